//! Figure out which candidate path holds which game.
//!
//! Users point configuration either at a game's install
//! directory (which contains the data folder) or at the
//! data folder itself. Both spellings must land on the
//! same answer, so location runs two passes: parent
//! folder names first, then marker files.

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::fallback::FallbackProvider;
use crate::folder::AssetFolder;
use crate::profile::registry;
use crate::profile::subfolder_variants;


/// Probe `candidates` in order and hand back a folder
/// handle for the first structural match.
///
/// The returned folder is NOT validated. Callers decide
/// between "found but invalid" and "not found", which are
/// different conversations to have with a user.
///
/// Blank entries in `candidates` are skipped, they are the
/// normal shape of unset configuration, not an error.
#[ tracing::instrument( skip_all ) ]
pub fn locate_asset_folder(
    candidates: &[ PathBuf ],
    fallback: &Arc<dyn FallbackProvider>,
) -> Option<AssetFolder>
{
    debug!( ?candidates, "locate asset folder" );

    let candidates = || {
        candidates.iter()
            .filter( |path| !is_blank( path ) )
    };

    // Pass one: the candidate is a parent directory and
    // one title's data folder sits under it, in any of the
    // known case spellings. Registry order breaks ties
    // between titles, variant order prefers the canonical
    // spelling.
    for path in candidates() {
        for ( game, profile ) in registry() {
            for variant in subfolder_variants( profile.subfolder ) {
                let dir = path.join( &variant );
                if dir.is_dir() {
                    debug! { %game, dir = %dir.display(),
                        "matched by subfolder name"
                    };
                    return AssetFolder::with_fallback(
                        *game, dir, fallback.clone()
                    )
                }
            }
        }
    }

    // Pass two: the candidate is a data folder itself.
    // Recognize it by each title's marker files, all of
    // which must be present at once. First fully matching
    // title of the earliest candidate wins.
    for path in candidates() {
        for ( game, profile ) in registry() {
            let all_markers_present = profile.markers.iter()
                .all( |marker| path.join( marker ).is_file() );
            if all_markers_present {
                debug! { %game, dir = %path.display(),
                    "matched by marker files"
                };
                return AssetFolder::with_fallback(
                    *game, path.clone(), fallback.clone()
                )
            }
        }
    }

    debug!( "no candidate matched" );

    None

}

fn is_blank( path: &Path ) -> bool {
    path.as_os_str().is_empty()
        || path.to_str().is_some_and( |s| s.trim().is_empty() )
}


#[ cfg( test ) ]
#[ allow( clippy::unwrap_used ) ]
mod test {

    use super::*;

    #[ test ]
    fn blank_detection() {
        assert!( is_blank( Path::new( "" ) ) );
        assert!( is_blank( Path::new( "   " ) ) );
        assert!( !is_blank( Path::new( "/somewhere" ) ) );
    }

}
