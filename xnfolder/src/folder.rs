//! One candidate (or validated) installation of one title.

use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::fallback::FallbackProvider;
use crate::fallback::NoFallback;
use crate::game::Game;
use crate::profile::GameProfile;
use crate::profile::Payload;
use crate::profile::Requirement;
use crate::profile::ResourceKind;
use crate::scan;


/// Where an archive kind was resolved to.
///
/// `FallbackOnly` is deliberately path-less: consumers of
/// a bundled substitute must go through the fallback
/// provider, not pretend there is a file on disk.
#[ derive( Debug, Clone, PartialEq, Eq ) ]
pub enum ArchivePresence {
    Missing,
    OnDisk( PathBuf ),
    FallbackOnly,
}

static MISSING: ArchivePresence = ArchivePresence::Missing;


/// One requirement the most recent scan failed to meet.
#[ derive( Debug, Clone, PartialEq, Eq ) ]
pub enum Shortfall {
    BulkBelowMinimum {
        kind: ResourceKind,
        found: usize,
        min: usize,
    },
    ArchiveMissing {
        kind: ResourceKind,
    },
}

impl std::fmt::Display for Shortfall {
    fn fmt( &self, f: &mut std::fmt::Formatter<'_> )
        -> std::fmt::Result
    {
        match self {
            Self::BulkBelowMinimum { kind, found, min } => write! {
                f, "{kind}: found {found} files, need at least {min}"
            },
            Self::ArchiveMissing { kind } => write! {
                f, "{kind}: not on disk and no bundled substitute"
            },
        }
    }
}

/// Outcome of the most recent full scan, kept so a caller
/// can say which requirement sank a folder instead of just
/// "invalid".
#[ derive( Debug, Clone, Default ) ]
pub struct Report {
    shortfalls: Vec<Shortfall>,
}

impl Report {
    pub fn is_valid( &self ) -> bool {
        self.shortfalls.is_empty()
    }

    pub fn shortfalls( &self ) -> &[ Shortfall ] {
        &self.shortfalls
    }
}


/// Everything one validation pass resolved.
#[ derive( Debug, Clone, Default, PartialEq, Eq ) ]
struct Resolved {
    archives: BTreeMap<ResourceKind, ArchivePresence>,
    bulk: BTreeMap<ResourceKind, Vec<PathBuf>>,
}


/// An asset folder of one title at one path.
///
/// Construction does no I/O. [`AssetFolder::validate`]
/// performs the scan, every accessor is safe to call at
/// any point and reports absent/empty until a scan
/// succeeded.
pub struct AssetFolder {
    game: Game,
    profile: &'static GameProfile,
    root: PathBuf,
    fallback: Arc<dyn FallbackProvider>,
    resolved: Resolved,
    last_report: Option<Report>,
}

impl AssetFolder {

    /// A folder handle with no bundled fallbacks.
    /// None for titles without a profile.
    pub fn new( game: Game, root: impl Into<PathBuf> )
        -> Option<Self>
    {
        Self::with_fallback( game, root, Arc::new( NoFallback ) )
    }

    pub fn with_fallback(
        game: Game,
        root: impl Into<PathBuf>,
        fallback: Arc<dyn FallbackProvider>,
    ) -> Option<Self>
    {
        let profile = game.profile()?;
        Some( Self {
            game,
            profile,
            root: root.into(),
            fallback,
            resolved: Resolved::default(),
            last_report: None,
        } )
    }

    pub fn game( &self ) -> Game {
        self.game
    }

    pub fn path( &self ) -> &Path {
        &self.root
    }

    /// Scan the folder against the title's profile.
    ///
    /// Video minimums are only enforced with
    /// `require_videos`, the base game plays fine without
    /// its intro discs.
    ///
    /// On success the resolved state is replaced wholesale.
    /// On failure it keeps the previous (possibly stale)
    /// contents, so callers relying on last-known-good must
    /// check the returned bool, not just the accessors.
    #[ tracing::instrument(
        skip( self ),
        fields( root = %self.root.display(), game = %self.game ),
    ) ]
    pub fn validate( &mut self, require_videos: bool ) -> bool {

        debug!( "validate asset folder" );

        if self.root.as_os_str().is_empty() || !self.root.is_dir() {
            debug!( "root is no directory, nothing scanned" );
            return false
        }

        let mut fresh = Resolved::default();
        let mut shortfalls = Vec::new();

        for spec in self.profile.resources {
            match spec.payload {

                Payload::Archive => {
                    let presence = self.resolve_archive( spec.pattern );
                    let missing =
                        presence == ArchivePresence::Missing;
                    if missing
                        && spec.requirement == Requirement::Mandatory
                    {
                        shortfalls.push( Shortfall::ArchiveMissing {
                            kind: spec.kind
                        } );
                    }
                    fresh.archives.insert( spec.kind, presence );
                },

                Payload::Bulk { min } => {
                    let files =
                        scan::scan_dir( &self.root, spec.pattern );
                    let enough = match spec.requirement {
                        Requirement::Mandatory =>
                            files.len() >= min,
                        Requirement::OnRequest =>
                            !require_videos
                            || files.len() >= min
                            || self.video_fallback_available(),
                        Requirement::Tracked => true,
                    };
                    if !enough {
                        shortfalls.push( Shortfall::BulkBelowMinimum {
                            kind: spec.kind,
                            found: files.len(),
                            min,
                        } );
                    }
                    fresh.bulk.insert( spec.kind, files );
                },

            }
        }

        let report = Report { shortfalls };
        let valid = report.is_valid();

        debug!( valid, ?report, "scan finished" );

        if valid {
            self.resolved = fresh;
        }
        self.last_report = Some( report );

        valid

    }

    fn resolve_archive( &self, name: &str ) -> ArchivePresence {
        let mut hits = scan::scan_dir( &self.root, name );
        match ( hits.len(), hits.pop() ) {
            ( 1, Some( path ) ) => ArchivePresence::OnDisk( path ),
            _ if self.fallback.contains( name ) =>
                ArchivePresence::FallbackOnly,
            _ => ArchivePresence::Missing,
        }
    }

    fn video_fallback_available( &self ) -> bool {
        self.profile.video_probe
            .is_some_and( |probe| self.fallback.contains( probe ) )
    }

    /// Tri-state of an archive kind. Kinds the title does
    /// not define are simply `Missing`.
    pub fn archive_presence( &self, kind: ResourceKind )
        -> &ArchivePresence
    {
        self.resolved.archives.get( &kind ).unwrap_or( &MISSING )
    }

    /// On-disk location of an archive kind. None while
    /// `Missing` or `FallbackOnly`, bundled substitutes
    /// are reachable through the fallback provider alone.
    pub fn archive_path( &self, kind: ResourceKind )
        -> Option<&Path>
    {
        match self.resolved.archives.get( &kind ) {
            Some( ArchivePresence::OnDisk( path ) ) =>
                Some( path ),
            _ => None,
        }
    }

    /// Matched files of a bulk kind, sorted. Empty before
    /// the first successful validation, for kinds the
    /// title does not define, and for archive kinds.
    pub fn filepaths( &self, kind: ResourceKind )
        -> &[ PathBuf ]
    {
        self.resolved.bulk
            .get( &kind )
            .map_or( &[], Vec::as_slice )
    }

    /// Outcome of the most recent full scan, None until
    /// one ran. Present (and possibly failing) even when
    /// the resolved state kept earlier contents.
    pub fn last_report( &self ) -> Option<&Report> {
        self.last_report.as_ref()
    }

}


#[ cfg( test ) ]
#[ allow( clippy::unwrap_used ) ]
mod test {

    use assert_fs::TempDir;
    use assert_fs::prelude::*;

    use crate::fallback::BundledResources;

    use super::*;

    #[ test ]
    fn unsupported_title_has_no_folder() {
        assert!( AssetFolder::new( Game::Skynet, "/tmp" ).is_none() );
    }

    #[ test ]
    fn empty_root_fails_fast() {
        let mut folder =
            AssetFolder::new( Game::Daggerfall, "" ).unwrap();
        assert!( !folder.validate( false ) );
        // Fail-fast leaves no report behind, nothing
        // was scanned.
        assert!( folder.last_report().is_none() );
    }

    #[ test ]
    fn missing_root_fails_fast() {
        let top = TempDir::new().unwrap();
        let gone = top.path().join( "arena2" );

        let mut folder =
            AssetFolder::new( Game::Daggerfall, gone ).unwrap();

        assert!( !folder.validate( false ) );
        assert!( folder.last_report().is_none() );
    }

    #[ test ]
    fn accessors_are_inert_before_validation() {
        let folder =
            AssetFolder::new( Game::Daggerfall, "/nowhere" ).unwrap();

        assert!( folder.filepaths( ResourceKind::Font ).is_empty() );
        assert! {
            folder.archive_path( ResourceKind::MapArchive ).is_none()
        };
        assert_eq! {
            folder.archive_presence( ResourceKind::MapArchive ),
            &ArchivePresence::Missing
        };
    }

    #[ test ]
    fn undefined_kind_reads_as_absent() {
        // Daggerfall has no height maps or music archive.
        let top = TempDir::new().unwrap();
        let mut folder =
            AssetFolder::new( Game::Daggerfall, top.path() ).unwrap();
        folder.validate( false );

        assert! {
            folder.filepaths( ResourceKind::HeightMap ).is_empty()
        };
        assert_eq! {
            folder.archive_presence( ResourceKind::MusicArchive ),
            &ArchivePresence::Missing
        };
    }

    #[ test ]
    fn failed_scan_still_reports_shortfalls() {
        let top = TempDir::new().unwrap();
        top.child( "MAPS.BSA" ).touch().unwrap();

        let mut folder =
            AssetFolder::new( Game::Daggerfall, top.path() ).unwrap();

        assert!( !folder.validate( false ) );

        let report = folder.last_report().unwrap();
        assert!( !report.is_valid() );
        assert! {
            report.shortfalls().iter().any( |s| matches! {
                s,
                Shortfall::ArchiveMissing {
                    kind: ResourceKind::WoodsArchive
                }
            } )
        };
        // But the resolved state stayed untouched.
        assert! {
            folder.archive_path( ResourceKind::MapArchive ).is_none()
        };
    }

    #[ test ]
    fn fallback_satisfies_mandatory_archive() {
        let top = TempDir::new().unwrap();
        // Everything on disk except the sound archive.
        for name in [
            "BLOCKS.BSA", "MAPS.BSA", "ARCH3D.BSA", "WOODS.WLD",
        ] {
            top.child( name ).touch().unwrap();
        }
        for idx in 0..4 {
            top.child( format!( "FONT000{idx}.FNT" ) )
                .touch().unwrap();
        }
        for idx in 0..472 {
            top.child( format!( "TEXTURE.{idx:03}" ) )
                .touch().unwrap();
        }

        let bundle = Arc::new(
            BundledResources::from_names( [ "DAGGER.SND" ] )
        );
        let mut folder = AssetFolder::with_fallback(
            Game::Daggerfall, top.path(), bundle
        ).unwrap();

        assert!( folder.validate( false ) );
        assert_eq! {
            folder.archive_presence( ResourceKind::SfxArchive ),
            &ArchivePresence::FallbackOnly
        };
        assert! {
            folder.archive_path( ResourceKind::SfxArchive ).is_none()
        };
    }

}
