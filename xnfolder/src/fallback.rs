//! Substitutes for archives that are not on disk.
//!
//! A port of the game can bundle pre-converted copies of
//! some archives inside its own resources. Validation asks
//! an injected [`FallbackProvider`] about those, so a folder
//! stripped of, say, its sound archive still counts as
//! complete when a bundled substitute exists.

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;


/// Read-only lookup consulted during validation when an
/// archive is absent from disk. Implementations must be
/// side-effect free, validation may probe them any number
/// of times.
pub trait FallbackProvider {
    /// Whether a substitute for the named archive
    /// is available.
    fn contains( &self, name: &str ) -> bool;
}


/// The provider for plain installs with nothing bundled.
#[ derive( Debug, Clone, Copy, Default ) ]
pub struct NoFallback;

impl FallbackProvider for NoFallback {
    fn contains( &self, _name: &str ) -> bool {
        false
    }
}


#[ derive( Debug, thiserror::Error ) ]
pub enum BundleError {
    #[ error( r#"Bundle path "{0}" is not a directory"# ) ]
    NotADirectory( std::path::PathBuf ),
    #[ error( "Failed to list bundle directory" ) ]
    Unlistable( #[ from ] std::io::Error ),
}

/// An immutable set of bundled resource names, built once
/// before any folder is validated and never touched again.
///
/// Lookups fold ASCII case, archive constants are uppercase
/// 8.3 names while a bundle assembled by hand may not be.
#[ derive( Debug, Clone, Default ) ]
pub struct BundledResources {
    names: HashSet<String>,
}

impl BundledResources {

    pub fn from_names<I, S>( names: I ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names.into_iter()
            .map( |name| name.as_ref().to_ascii_uppercase() )
            .collect();
        Self { names }
    }

    /// Treat the file names inside `dir` as the bundle.
    #[ tracing::instrument ]
    pub fn from_dir( dir: &Path ) -> Result<Self, BundleError> {
        debug!( "collect bundled resource names" );

        if !dir.is_dir() {
            return Err( BundleError::NotADirectory( dir.to_owned() ) )
        }

        let mut names = HashSet::new();

        for entry in std::fs::read_dir( dir )? {
            let entry = entry?;
            match entry.file_name().to_str() {
                Some( name ) =>
                    names.insert( name.to_ascii_uppercase() ),
                None => {
                    debug!( "skip non-utf8 bundle entry" );
                    continue
                }
            };
        }

        debug!( ?names, "bundle loaded" );

        Ok( Self { names } )
    }

    pub fn len( &self ) -> usize {
        self.names.len()
    }

    pub fn is_empty( &self ) -> bool {
        self.names.is_empty()
    }

}

impl FallbackProvider for BundledResources {
    fn contains( &self, name: &str ) -> bool {
        self.names.contains( &name.to_ascii_uppercase() )
    }
}


#[ cfg( test ) ]
#[ allow( clippy::unwrap_used ) ]
mod test {

    use assert_fs::TempDir;
    use assert_fs::prelude::*;

    use super::*;

    #[ test ]
    fn no_fallback_has_nothing() {
        assert!( !NoFallback.contains( "WOODS.WLD" ) );
    }

    #[ test ]
    fn names_fold_case() {
        let bundle = BundledResources::from_names( [ "woods.wld" ] );
        assert!( bundle.contains( "WOODS.WLD" ) );
        assert!( bundle.contains( "woods.wld" ) );
        assert!( !bundle.contains( "MAPS.BSA" ) );
    }

    #[ test ]
    fn from_dir_lists_file_names() {
        let top = TempDir::new().unwrap();
        top.child( "MAPS.BSA" ).touch().unwrap();
        top.child( "Arch3d.bsa" ).touch().unwrap();

        let bundle = BundledResources::from_dir( top.path() ).unwrap();

        assert_eq!( bundle.len(), 2 );
        assert!( bundle.contains( "ARCH3D.BSA" ) );
    }

    #[ test ]
    fn from_dir_rejects_non_directory() {
        let top = TempDir::new().unwrap();
        let file = top.child( "plain" );
        file.touch().unwrap();

        let res = BundledResources::from_dir( file.path() );

        assert!( matches! {
            res, Err( BundleError::NotADirectory( _ ) )
        } );
    }

}
