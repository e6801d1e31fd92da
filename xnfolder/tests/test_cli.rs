#![ allow( clippy::unwrap_used ) ]
#![ allow( clippy::expect_used ) ]

use std::process::Command;

use assert_fs::TempDir;
use assert_fs::fixture::ChildPath;
use assert_fs::prelude::*;


fn make_main_program() -> Command {
    let exe = std::env!( "CARGO_BIN_EXE_xnfolder" );
    std::process::Command::new( exe )
}

/// A complete Daggerfall data folder under `top`.
fn setup_arena2( top: &TempDir ) -> ChildPath {
    let dir = top.child( "ARENA2" );
    dir.create_dir_all().unwrap();
    for name in [
        "MONSTER.BSA", "BLOCKS.BSA", "MAPS.BSA",
        "ARCH3D.BSA", "DAGGER.SND", "WOODS.WLD",
    ] {
        dir.child( name ).touch().unwrap();
    }
    for idx in 0..4 {
        dir.child( format!( "FONT{idx:04}.FNT" ) ).touch().unwrap();
    }
    for idx in 0..472 {
        dir.child( format!( "TEXTURE.{idx:03}" ) ).touch().unwrap();
    }
    dir
}


#[ test ]
fn valid_install_exits_zero() {
    let top = TempDir::new().unwrap();
    setup_arena2( &top );

    let res = make_main_program()
        .arg( top.path() )
        .output().unwrap()
    ;

    assert!( res.status.success() );
    assert! {
        String::from_utf8_lossy( &res.stdout )
            .contains( "Daggerfall" )
    };
}


#[ test ]
fn nothing_found_exits_two() {
    let top = TempDir::new().unwrap();

    let res = make_main_program()
        .arg( top.path() )
        .output().unwrap()
    ;

    assert_eq!( res.status.code(), Some( 2 ) );
}


#[ test ]
fn broken_install_exits_one_and_names_the_reason() {
    let top = TempDir::new().unwrap();
    let dir = setup_arena2( &top );
    std::fs::remove_file( dir.child( "WOODS.WLD" ).path() )
        .unwrap();

    let res = make_main_program()
        .arg( top.path() )
        .output().unwrap()
    ;

    assert_eq!( res.status.code(), Some( 1 ) );
    assert! {
        String::from_utf8_lossy( &res.stdout )
            .contains( "WoodsArchive" )
    };
}


#[ test ]
fn json_report_is_parseable() {
    let top = TempDir::new().unwrap();
    setup_arena2( &top );

    let res = make_main_program()
        .arg( "--json" )
        .arg( top.path() )
        .output().unwrap()
    ;

    assert!( res.status.success() );

    let report: serde_json::Value =
        serde_json::from_slice( &res.stdout ).unwrap();

    assert_eq!( report["found"], true );
    assert_eq!( report["valid"], true );
    assert! {
        report["game"].as_str().unwrap()
            .contains( "Daggerfall" )
    };
    assert_eq! {
        report["archives"]["ModelArchive"]["state"], "on-disk"
    };
    assert_eq!( report["bulk"]["Texture"]["found"], 472 );
}


#[ test ]
fn bundled_resources_rescue_missing_archives() {
    let top = TempDir::new().unwrap();
    let dir = setup_arena2( &top );
    std::fs::remove_file( dir.child( "DAGGER.SND" ).path() )
        .unwrap();

    let bundle = top.child( "bundle" );
    bundle.create_dir_all().unwrap();
    bundle.child( "DAGGER.SND" ).touch().unwrap();

    // Parent path on purpose: with the sound archive
    // gone the folder no longer carries its own full
    // marker set, only the subfolder name gives it away.
    let res = make_main_program()
        .arg( "--json" )
        .arg( "--bundled" ).arg( bundle.path() )
        .arg( top.path() )
        .output().unwrap()
    ;

    assert!( res.status.success() );

    let report: serde_json::Value =
        serde_json::from_slice( &res.stdout ).unwrap();

    assert_eq! {
        report["archives"]["SfxArchive"]["state"], "fallback-only"
    };
}
