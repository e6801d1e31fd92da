//! Non-recursive directory scans with DOS style
//! wildcard patterns.

use std::path::Path;
use std::path::PathBuf;

use tracing::debug;


/// Whether pattern matching folds ASCII case.
///
/// The original engine data shipped on FAT media with
/// 8.3 uppercase names, and scans went through the OS
/// which matches case-insensitively on Windows only.
/// Same convention here.
const FOLD_CASE: bool = cfg!( windows );


/// List the files in `dir` whose name matches `pattern`,
/// sorted by path so repeated scans of an unchanged
/// directory give identical results.
///
/// A directory that cannot be read at all scans as empty
/// rather than erroring, a folder in that state is no
/// more usable than an absent one.
pub fn scan_dir( dir: &Path, pattern: &str ) -> Vec<PathBuf> {

    let entries = match std::fs::read_dir( dir ) {
        Ok( entries ) => entries,
        Err( err ) => {
            debug! { ?err, dir = %dir.display(),
                "unreadable directory scanned as empty"
            };
            return Vec::new()
        }
    };

    let mut matched = Vec::new();

    for entry in entries {
        let Ok( entry ) = entry else {
            debug!( "skip unreadable entry" );
            continue
        };
        match entry.file_type() {
            Ok( ft ) if ft.is_file() => (),
            _ => continue,
        }
        let name = entry.file_name();
        let Some( name ) = name.to_str() else {
            debug!( ?name, "skip non-utf8 filename" );
            continue
        };
        if wildcard_match( pattern, name, FOLD_CASE ) {
            matched.push( entry.path() )
        }
    }

    matched.sort();

    matched

}


/// `?` matches exactly one character, `*` any run
/// including the empty one, everything else itself.
fn wildcard_match( pattern: &str, name: &str, fold_case: bool )
    -> bool
{
    let byte_eq = |a: u8, b: u8| {
        if fold_case { a.eq_ignore_ascii_case( &b ) } else { a == b }
    };

    let pattern = pattern.as_bytes();
    let name = name.as_bytes();

    let mut pi = 0;
    let mut ni = 0;
    // Position to resume from when a later literal
    // mismatch forces the last `*` to eat one more byte.
    let mut backtrack: Option<( usize, usize )> = None;

    while let Some( &next ) = name.get( ni ) {
        match pattern.get( pi ) {
            Some( b'*' ) => {
                backtrack = Some( ( pi, ni ) );
                pi += 1;
            },
            Some( &p ) if p == b'?' || byte_eq( p, next ) => {
                pi += 1;
                ni += 1;
            },
            _ => match backtrack {
                Some( ( star, eaten ) ) => {
                    pi = star + 1;
                    ni = eaten + 1;
                    backtrack = Some( ( star, eaten + 1 ) );
                },
                None => return false,
            }
        }
    }

    pattern.iter().skip( pi ).all( |&p| p == b'*' )
}


#[ cfg( test ) ]
#[ allow( clippy::unwrap_used, clippy::indexing_slicing ) ]
mod test {

    use assert_fs::TempDir;
    use assert_fs::prelude::*;

    use super::*;

    fn matches( pattern: &str, name: &str ) -> bool {
        wildcard_match( pattern, name, false )
    }

    #[ test ]
    fn question_mark_is_exactly_one() {
        assert!( matches( "FONT????.FNT", "FONT0001.FNT" ) );
        assert!( !matches( "FONT????.FNT", "FONT001.FNT" ) );
        assert!( !matches( "FONT????.FNT", "FONT00001.FNT" ) );
        assert!( matches( "TEXTURE.???", "TEXTURE.095" ) );
        assert!( !matches( "TEXTURE.???", "TEXTURE.95" ) );
        assert!( !matches( "TEXTURE.???", "TEXTURE.0950" ) );
    }

    #[ test ]
    fn star_is_any_run() {
        assert!( matches( "*.VID", "ANIM0011.VID" ) );
        assert!( matches( "*.VID", ".VID" ) );
        assert!( !matches( "*.VID", "ANIM0011.VI" ) );
        assert!( matches( "*", "whatever" ) );
        assert!( matches( "A*B*C", "AxxByyC" ) );
        assert!( !matches( "A*B*C", "AxxByy" ) );
    }

    #[ test ]
    fn literal_patterns_are_exact() {
        assert!( matches( "WOODS.WLD", "WOODS.WLD" ) );
        assert!( !matches( "WOODS.WLD", "WOODS.WLD.bak" ) );
        assert!( !matches( "WOODS.WLD", "woods.wld" ) );
    }

    #[ test ]
    fn case_folding_is_opt_in() {
        assert!( wildcard_match( "WOODS.WLD", "woods.wld", true ) );
        assert!( wildcard_match( "*.VID", "anim0011.vid", true ) );
        assert!( !wildcard_match( "*.VID", "anim0011.vid", false ) );
    }

    #[ test ]
    fn scan_is_sorted_and_files_only() {
        let top = TempDir::new().unwrap();
        top.child( "TEXTURE.002" ).touch().unwrap();
        top.child( "TEXTURE.001" ).touch().unwrap();
        top.child( "TEXTURE.ALSO.NOT" ).touch().unwrap();
        // A directory with a matching name is not a file.
        top.child( "TEXTURE.DIR" ).create_dir_all().unwrap();

        let found = scan_dir( top.path(), "TEXTURE.???" );

        assert_eq!( found.len(), 2 );
        assert!( found[0].ends_with( "TEXTURE.001" ) );
        assert!( found[1].ends_with( "TEXTURE.002" ) );
    }

    #[ test ]
    fn missing_directory_scans_empty() {
        let top = TempDir::new().unwrap();
        let gone = top.path().join( "nothing-here" );
        assert!( scan_dir( &gone, "*" ).is_empty() );
    }

}
