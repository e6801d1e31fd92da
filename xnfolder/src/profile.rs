//! Per-title data tables.
//!
//! Everything a folder scan needs to know about one title
//! lives in its [`GameProfile`]. Supporting another XnGine
//! game means adding a [`Game`] variant and one more entry
//! to [`registry`], nothing else.

use itertools::Itertools;

use crate::game::Game;


/// Semantic category of the files inside an asset folder.
#[ derive(
    Debug, Clone, Copy,
    PartialEq, Eq, PartialOrd, Ord, Hash,
    strum::Display,
) ]
pub enum ResourceKind {
    Font,
    Texture,
    Video,
    HeightMap,
    Music,
    BriefingArchive,
    EnemyArchive,
    ImageArchive,
    MapArchive,
    MapBlockArchive,
    ModelArchive,
    MusicArchive,
    SfxArchive,
    WoodsArchive,
}

/// How many files a [`ResourceSpec`] pattern is
/// supposed to pick up.
#[ derive( Debug, Clone, Copy, PartialEq, Eq ) ]
pub enum Payload {
    /// One monolithic data file with a fixed name.
    Archive,
    /// Many individually named files, valid from
    /// `min` matches up.
    Bulk { min: usize },
}

/// Whether missing this resource sinks the whole folder.
#[ derive( Debug, Clone, Copy, PartialEq, Eq ) ]
pub enum Requirement {
    /// Absence makes the folder invalid.
    Mandatory,
    /// Only enforced when the caller opts in.
    /// Videos are skippable for the base game.
    OnRequest,
    /// Scanned and reported, never fatal.
    Tracked,
}

#[ derive( Debug, Clone, Copy ) ]
pub struct ResourceSpec {
    pub kind: ResourceKind,
    /// DOS style wildcard pattern, or the literal archive
    /// filename. Archive names double as the key handed
    /// to the fallback provider.
    pub pattern: &'static str,
    pub payload: Payload,
    pub requirement: Requirement,
}

#[ derive( Debug, Clone, Copy ) ]
pub struct GameProfile {
    /// Canonical name of the data folder under a parent
    /// install directory. Case variants are derived with
    /// [`subfolder_variants`], not stored.
    pub subfolder: &'static str,
    /// Files which, all present at once, identify the
    /// title when the user points at the data folder
    /// itself instead of its parent.
    pub markers: &'static [ &'static str ],
    pub resources: &'static [ ResourceSpec ],
    /// Name asked of the fallback provider when deciding
    /// whether bundled videos substitute for on-disk ones.
    pub video_probe: Option<&'static str>,
}

impl GameProfile {
    pub fn spec( &self, kind: ResourceKind )
        -> Option<&'static ResourceSpec>
    {
        self.resources.iter().find( |s| s.kind == kind )
    }
}


use Payload::{ Archive, Bulk };
use Requirement::{ Mandatory, OnRequest, Tracked };
use ResourceKind as Kind;

static DAGGERFALL: GameProfile = GameProfile {
    subfolder: "Arena2",
    markers: &[ "ARCH3D.BSA", "DAGGER.SND" ],
    video_probe: Some( "ANIM0011.VID" ),
    resources: &[
        ResourceSpec {
            kind: Kind::Font,
            pattern: "FONT????.FNT",
            payload: Bulk { min: 4 },
            requirement: Mandatory,
        },
        ResourceSpec {
            kind: Kind::Texture,
            pattern: "TEXTURE.???",
            payload: Bulk { min: 472 },
            requirement: Mandatory,
        },
        ResourceSpec {
            kind: Kind::Video,
            pattern: "*.VID",
            payload: Bulk { min: 17 },
            requirement: OnRequest,
        },
        // Daggerfall runs fine without MONSTER.BSA,
        // enemies are simply absent.
        ResourceSpec {
            kind: Kind::EnemyArchive,
            pattern: "MONSTER.BSA",
            payload: Archive,
            requirement: Tracked,
        },
        ResourceSpec {
            kind: Kind::MapBlockArchive,
            pattern: "BLOCKS.BSA",
            payload: Archive,
            requirement: Mandatory,
        },
        ResourceSpec {
            kind: Kind::MapArchive,
            pattern: "MAPS.BSA",
            payload: Archive,
            requirement: Mandatory,
        },
        ResourceSpec {
            kind: Kind::ModelArchive,
            pattern: "ARCH3D.BSA",
            payload: Archive,
            requirement: Mandatory,
        },
        ResourceSpec {
            kind: Kind::SfxArchive,
            pattern: "DAGGER.SND",
            payload: Archive,
            requirement: Mandatory,
        },
        ResourceSpec {
            kind: Kind::WoodsArchive,
            pattern: "WOODS.WLD",
            payload: Archive,
            requirement: Mandatory,
        },
    ],
};

static FUTURE_SHOCK: GameProfile = GameProfile {
    subfolder: "GAMEDATA",
    markers: &[ "MDMDBRIF.BSA", "SHOCK.COL" ],
    video_probe: None,
    resources: &[
        ResourceSpec {
            kind: Kind::Font,
            pattern: "FONT????.FNT",
            payload: Bulk { min: 8 },
            requirement: Mandatory,
        },
        ResourceSpec {
            kind: Kind::Texture,
            pattern: "TEXTURE.???",
            payload: Bulk { min: 213 },
            requirement: Mandatory,
        },
        ResourceSpec {
            kind: Kind::Video,
            pattern: "*.VID",
            payload: Bulk { min: 4 },
            requirement: OnRequest,
        },
        ResourceSpec {
            kind: Kind::HeightMap,
            pattern: "WLD.???",
            payload: Bulk { min: 16 },
            requirement: Mandatory,
        },
        ResourceSpec {
            kind: Kind::Music,
            pattern: "*.HMI",
            payload: Bulk { min: 16 },
            requirement: Mandatory,
        },
        ResourceSpec {
            kind: Kind::BriefingArchive,
            pattern: "MDMDBRIF.BSA",
            payload: Archive,
            requirement: Tracked,
        },
        ResourceSpec {
            kind: Kind::EnemyArchive,
            pattern: "MDMDENMS.BSA",
            payload: Archive,
            requirement: Tracked,
        },
        ResourceSpec {
            kind: Kind::ImageArchive,
            pattern: "MDMDIMGS.BSA",
            payload: Archive,
            requirement: Tracked,
        },
        ResourceSpec {
            kind: Kind::MapArchive,
            pattern: "MDMDMAPS.BSA",
            payload: Archive,
            requirement: Mandatory,
        },
        ResourceSpec {
            kind: Kind::ModelArchive,
            pattern: "MDMDOBJS.BSA",
            payload: Archive,
            requirement: Mandatory,
        },
        ResourceSpec {
            kind: Kind::MusicArchive,
            pattern: "MDMDMUSC.BSA",
            payload: Archive,
            requirement: Mandatory,
        },
        ResourceSpec {
            kind: Kind::SfxArchive,
            pattern: "MDMDSFXS.BSA",
            payload: Archive,
            requirement: Mandatory,
        },
    ],
};

/// Every title with a profile, in detection order.
///
/// The order is a deliberate tie break: when two titles
/// could both match under one parent path, the earlier
/// entry wins.
pub fn registry() -> &'static [ ( Game, &'static GameProfile ) ] {
    static REGISTRY: [ ( Game, &GameProfile ); 2 ] = [
        ( Game::Daggerfall, &DAGGERFALL ),
        ( Game::FutureShock, &FUTURE_SHOCK ),
    ];
    &REGISTRY
}

/// Case variants of a data folder name to probe under
/// a parent path, most specific first. Filesystem case
/// sensitivity differs across platforms, so canonical,
/// all-lowercase and all-uppercase are each tried.
pub fn subfolder_variants( name: &str ) -> Vec<String> {
    [
        name.to_owned(),
        name.to_lowercase(),
        name.to_uppercase(),
    ]
        .into_iter()
        .unique()
        .collect()
}


#[ cfg( test ) ]
#[ allow( clippy::unwrap_used ) ]
mod test {

    use super::*;

    #[ test ]
    fn daggerfall_enumerates_first() {
        let games: Vec<_> = registry().iter()
            .map( |( game, _ )| *game )
            .collect();
        assert_eq!( games, [ Game::Daggerfall, Game::FutureShock ] );
    }

    #[ test ]
    fn variants_keep_canonical_first() {
        assert_eq! {
            subfolder_variants( "Arena2" ),
            [ "Arena2", "arena2", "ARENA2" ]
        };
    }

    #[ test ]
    fn variants_are_deduplicated() {
        assert_eq! {
            subfolder_variants( "GAMEDATA" ),
            [ "GAMEDATA", "gamedata" ]
        };
    }

    #[ test ]
    fn archive_patterns_are_literal_filenames() {
        for ( _, profile ) in registry() {
            for spec in profile.resources {
                if spec.payload == Payload::Archive {
                    assert! {
                        !spec.pattern.contains( [ '*', '?' ] ),
                        "{} pattern {} has wildcards",
                        spec.kind, spec.pattern
                    };
                }
            }
        }
    }

    #[ test ]
    fn markers_belong_to_their_own_title() {
        // A Daggerfall folder must never satisfy the full
        // Future Shock marker set and vice versa.
        let ( daggerfall, shock ) = (
            Game::Daggerfall.profile().unwrap(),
            Game::FutureShock.profile().unwrap(),
        );
        for marker in shock.markers {
            assert!( daggerfall.spec_by_pattern( marker ).is_none() );
        }
        for marker in daggerfall.markers {
            assert!( shock.spec_by_pattern( marker ).is_none() );
        }
    }

    impl GameProfile {
        fn spec_by_pattern( &self, pattern: &str )
            -> Option<&ResourceSpec>
        {
            self.resources.iter()
                .find( |s| s.pattern == pattern )
        }
    }

}
