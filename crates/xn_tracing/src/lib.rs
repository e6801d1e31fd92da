/// Install the tracing_subscriber configuration used by
/// all binaries of this workspace.
///
/// Logs go to stderr so that the actual program output
/// stays clean on stdout. Verbosity is controlled with
/// the usual RUST_LOG, defaulting to INFO.
#[ inline( always ) ]
pub fn init() {

    use std::io::IsTerminal;

    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::registry;

    let env_filter = EnvFilter::builder()
        .with_default_directive( LevelFilter::INFO.into() )
        .from_env_lossy()
    ;

    let writer = std::io::stderr;

    registry()
        .with( env_filter )
        .with( fmt::layer()
            .with_writer( writer )
            .with_ansi( writer().is_terminal() )
        )
        .init()

}
