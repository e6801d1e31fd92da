//! CLI front of the folder detector.
//!
//! Probes candidate paths the same way the engine host
//! does at startup and reports what it found, so broken
//! installs can be diagnosed without booting the whole
//! port. Exit code speaks for scripts: 0 valid, 1 found
//! but unusable, 2 nothing found.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use tap::Pipe;
use tracing::debug;

use xnfolder::ArchivePresence;
use xnfolder::AssetFolder;
use xnfolder::BundledResources;
use xnfolder::FallbackProvider;
use xnfolder::NoFallback;
use xnfolder::locate_asset_folder;
use xnfolder::profile::Payload;


/// Locate and validate XnGine game asset folders.
///
/// Each candidate path may be either a game's install
/// directory or the data folder itself. The first
/// structural match wins and is then checked for a
/// complete file inventory.
#[ derive( Parser, Debug ) ]
#[ command( max_term_width = 76 ) ]
struct CmdOpts {
    /// Candidate paths to probe, highest precedence first.
    /// With none given, the working directory and a
    /// GameFiles directory under it are tried.
    candidates: Vec<PathBuf>,

    /// Also require the minimum set of intro/cutscene
    /// videos, which the base game can live without.
    #[ arg( long, short ) ]
    require_videos: bool,

    /// Directory whose file names stand in for archives
    /// missing from the asset folder.
    #[ arg( long ) ]
    bundled: Option<PathBuf>,

    /// Machine readable report on stdout.
    #[ arg( long ) ]
    json: bool,
}


fn main() -> anyhow::Result<ExitCode> {

    xn_tracing::init();

    let cmd_opts @ CmdOpts {
        require_videos,
        json,
        ..
    } = &CmdOpts::parse();

    debug!( ?cmd_opts );


    let candidates = if cmd_opts.candidates.is_empty() {
        debug!( "no candidates given, using defaults" );
        vec![ PathBuf::from( "." ), PathBuf::from( "GameFiles" ) ]
    } else {
        cmd_opts.candidates.clone()
    };


    let fallback: Arc<dyn FallbackProvider> =
        match &cmd_opts.bundled {
            Some( dir ) => BundledResources::from_dir( dir )
                .context( "Failed to load bundled resources" )?
                .pipe( Arc::new ),
            None => Arc::new( NoFallback ),
        };


    let Some( mut folder ) =
        locate_asset_folder( &candidates, &fallback )
    else {
        if *json {
            println!( "{}", serde_json::json!( { "found": false } ) );
        } else {
            eprintln! { "{}",
                "No game asset folder found among the candidate paths."
                    .red()
            };
        }
        return Ok( ExitCode::from( 2 ) )
    };


    let valid = folder.validate( *require_videos );

    if *json {
        print_json( &folder, valid );
    } else {
        print_human( &folder, valid );
    }

    Ok( if valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from( 1 )
    } )

}


fn print_human( folder: &AssetFolder, valid: bool ) {

    println! { "{} at {}",
        folder.game().to_string().blue().bold(),
        folder.path().display()
    };

    if !valid {
        // Resolved state keeps last-known-good on failure,
        // listing it here would dress up a broken folder.
        for shortfall in folder.last_report()
            .map( |r| r.shortfalls() )
            .unwrap_or_default()
        {
            println!( "{}", shortfall.to_string().red() );
        }
        println!( "{}", "Folder found but not usable.".red() );
        return
    }

    let Some( profile ) = folder.game().profile() else {
        return
    };

    for spec in profile.resources {
        let line = match spec.payload {
            Payload::Archive =>
                match folder.archive_presence( spec.kind ) {
                    ArchivePresence::OnDisk( path ) => format! {
                        "{}: {}", spec.kind, path.display()
                    },
                    ArchivePresence::FallbackOnly => format! {
                        "{}: bundled substitute", spec.kind
                    },
                    ArchivePresence::Missing => format! {
                        "{}: missing", spec.kind
                    },
                },
            Payload::Bulk { min } => format! {
                "{}: {} files (minimum {min})",
                spec.kind,
                folder.filepaths( spec.kind ).len()
            },
        };
        println!( "  {line}" );
    }

    println!( "{}", "Folder is a usable installation.".green() );

}


fn print_json( folder: &AssetFolder, valid: bool ) {

    use serde_json::json;

    let mut archives = serde_json::Map::new();
    let mut bulk = serde_json::Map::new();

    if let Some( profile ) = folder.game().profile() {
        for spec in profile.resources {
            match spec.payload {
                Payload::Archive => {
                    let state =
                        match folder.archive_presence( spec.kind ) {
                            ArchivePresence::OnDisk( path ) => json! {
                                { "state": "on-disk", "path": path }
                            },
                            ArchivePresence::FallbackOnly => json! {
                                { "state": "fallback-only" }
                            },
                            ArchivePresence::Missing => json! {
                                { "state": "missing" }
                            },
                        };
                    archives.insert( spec.kind.to_string(), state );
                },
                Payload::Bulk { min } => {
                    bulk.insert( spec.kind.to_string(), json! { {
                        "found": folder.filepaths( spec.kind ).len(),
                        "min": min,
                    } } );
                },
            }
        }
    }

    let shortfalls: Vec<String> = folder.last_report()
        .map( |report|
            report.shortfalls().iter()
                .map( ToString::to_string )
                .collect()
        )
        .unwrap_or_default();

    let report = json!( {
        "found": true,
        "game": folder.game().to_string(),
        "path": folder.path(),
        "valid": valid,
        "archives": archives,
        "bulk": bulk,
        "shortfalls": shortfalls,
    } );

    println!( "{report}" );

}
