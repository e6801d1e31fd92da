#![ allow( clippy::unwrap_used ) ]
#![ allow( clippy::expect_used ) ]

use assert_fs::TempDir;
use assert_fs::fixture::ChildPath;
use assert_fs::prelude::*;

use xnfolder::ArchivePresence;
use xnfolder::AssetFolder;
use xnfolder::Game;
use xnfolder::ResourceKind;
use xnfolder::Shortfall;


const TRACKED_ARCHIVES: [ &str; 3 ] = [
    "MDMDBRIF.BSA",
    "MDMDENMS.BSA",
    "MDMDIMGS.BSA",
];

const REQUIRED_ARCHIVES: [ ( &str, ResourceKind ); 4 ] = [
    ( "MDMDMAPS.BSA", ResourceKind::MapArchive ),
    ( "MDMDOBJS.BSA", ResourceKind::ModelArchive ),
    ( "MDMDMUSC.BSA", ResourceKind::MusicArchive ),
    ( "MDMDSFXS.BSA", ResourceKind::SfxArchive ),
];


struct Gamedata {
    dir: ChildPath,
}

impl Gamedata {

    /// The least folder that still validates. Tracked
    /// archives are left out on purpose, they must not
    /// matter.
    fn minimum( top: &TempDir ) -> Self {
        let this = Self { dir: top.child( "GAMEDATA" ) };
        this.dir.create_dir_all().unwrap();
        for ( name, _ ) in REQUIRED_ARCHIVES {
            this.file( name );
        }
        this.fonts( 8 );
        this.textures( 213 );
        this.height_maps( 16 );
        this.music( 16 );
        this
    }

    fn file( &self, name: &str ) {
        self.dir.child( name ).touch().unwrap();
    }

    fn remove( &self, name: &str ) {
        std::fs::remove_file( self.dir.child( name ).path() )
            .unwrap();
    }

    fn fonts( &self, count: usize ) {
        for idx in 0..count {
            self.file( &format!( "FONT{idx:04}.FNT" ) );
        }
    }

    fn textures( &self, count: usize ) {
        for idx in 0..count {
            self.file( &format!( "TEXTURE.{idx:03}" ) );
        }
    }

    fn height_maps( &self, count: usize ) {
        for idx in 0..count {
            self.file( &format!( "WLD.{idx:03}" ) );
        }
    }

    fn music( &self, count: usize ) {
        for idx in 0..count {
            self.file( &format!( "SONG{idx:04}.HMI" ) );
        }
    }

    fn videos( &self, count: usize ) {
        for idx in 0..count {
            self.file( &format!( "SHCK{idx:04}.VID" ) );
        }
    }

    fn folder( &self ) -> AssetFolder {
        AssetFolder::new( Game::FutureShock, self.dir.path() )
            .unwrap()
    }

}


#[ test ]
fn minimum_folder_validates() {
    let top = TempDir::new().unwrap();
    let gamedata = Gamedata::minimum( &top );

    let mut folder = gamedata.folder();

    assert!( folder.validate( false ) );

    for ( _, kind ) in REQUIRED_ARCHIVES {
        assert!( folder.archive_path( kind ).is_some() );
    }
    assert_eq!( folder.filepaths( ResourceKind::Font ).len(), 8 );
    assert_eq! {
        folder.filepaths( ResourceKind::Texture ).len(), 213
    };
    assert_eq! {
        folder.filepaths( ResourceKind::HeightMap ).len(), 16
    };
    assert_eq!( folder.filepaths( ResourceKind::Music ).len(), 16 );
}


#[ test ]
fn tracked_archives_never_sink_the_folder() {
    let top = TempDir::new().unwrap();
    let gamedata = Gamedata::minimum( &top );

    let mut folder = gamedata.folder();

    assert!( folder.validate( false ) );
    assert_eq! {
        folder.archive_presence( ResourceKind::BriefingArchive ),
        &ArchivePresence::Missing
    };

    // And once present they resolve like any other kind.
    for name in TRACKED_ARCHIVES {
        gamedata.file( name );
    }
    assert!( folder.validate( false ) );
    for kind in [
        ResourceKind::BriefingArchive,
        ResourceKind::EnemyArchive,
        ResourceKind::ImageArchive,
    ] {
        assert!( folder.archive_path( kind ).is_some() );
    }
}


#[ test ]
fn each_missing_required_archive_invalidates() {
    for ( name, kind ) in REQUIRED_ARCHIVES {
        let top = TempDir::new().unwrap();
        let gamedata = Gamedata::minimum( &top );
        gamedata.remove( name );

        let mut folder = gamedata.folder();

        assert!( !folder.validate( false ), "{name} should be fatal" );
        assert! {
            folder.last_report().unwrap()
                .shortfalls().iter().any( |s| matches! {
                    s,
                    Shortfall::ArchiveMissing { kind: k }
                        if *k == kind
                } )
        };
    }
}


#[ test ]
fn texture_minimum_is_boundary_exact() {
    let top = TempDir::new().unwrap();
    let gamedata = Gamedata::minimum( &top );
    gamedata.remove( "TEXTURE.212" );

    let mut folder = gamedata.folder();

    assert!( !folder.validate( false ) );
    assert! {
        folder.last_report().unwrap()
            .shortfalls().contains( &Shortfall::BulkBelowMinimum {
                kind: ResourceKind::Texture,
                found: 212,
                min: 213,
            } )
    };

    gamedata.file( "TEXTURE.212" );
    assert!( folder.validate( false ) );
}


#[ test ]
fn height_maps_and_music_are_required() {
    let top = TempDir::new().unwrap();
    let gamedata = Gamedata::minimum( &top );
    gamedata.remove( "WLD.015" );
    gamedata.remove( "SONG0015.HMI" );

    let mut folder = gamedata.folder();

    assert!( !folder.validate( false ) );
    let report = folder.last_report().unwrap();
    for kind in [ ResourceKind::HeightMap, ResourceKind::Music ] {
        assert! {
            report.shortfalls().contains(
                &Shortfall::BulkBelowMinimum {
                    kind,
                    found: 15,
                    min: 16,
                }
            )
        };
    }
}


#[ test ]
fn videos_only_required_on_request() {
    let top = TempDir::new().unwrap();
    let gamedata = Gamedata::minimum( &top );

    let mut folder = gamedata.folder();

    assert!( folder.validate( false ) );
    // Future Shock has no bundled video substitute,
    // the files must exist.
    assert!( !folder.validate( true ) );

    gamedata.videos( 4 );
    assert!( folder.validate( true ) );
}
