//! Find the game data, then trust it.
//!
//! XnGine games (Daggerfall, Future Shock and friends)
//! keep their assets in one flat folder of DOS era files:
//! a handful of fixed-name archives plus piles of
//! wildcard-named fonts, textures and videos. Ports need
//! to know 1. whether such a folder is around, 2. which
//! game it belongs to, 3. whether it is complete enough
//! to play, *before* any loader touches a single byte.
//!
//! This crate answers exactly those questions.
//! [`locate_asset_folder`] sniffs a list of candidate
//! paths and identifies the title, [`AssetFolder::validate`]
//! checks file inventory against the title's
//! [`GameProfile`], and the accessors on [`AssetFolder`]
//! are then the single source of truth on where each
//! archive lives. Nothing here opens an archive, presence
//! and counts are all that is checked so the probe stays
//! fast enough to run on every startup.

pub mod fallback;
pub mod folder;
pub mod game;
pub mod locator;
pub mod profile;

mod scan;

pub use fallback::BundledResources;
pub use fallback::FallbackProvider;
pub use fallback::NoFallback;
pub use folder::ArchivePresence;
pub use folder::AssetFolder;
pub use folder::Report;
pub use folder::Shortfall;
pub use game::Game;
pub use locator::locate_asset_folder;
pub use profile::GameProfile;
pub use profile::ResourceKind;
