use crate::profile;
use crate::profile::GameProfile;


/// All games released on the XnGine engine.
///
/// Only a couple of them have asset folder profiles
/// so far, see [`profile::registry`].
#[ derive( Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display ) ]
pub enum Game {
    /// Burnout: Championship Drag Racing (1998)
    #[ strum( to_string = "Burnout: Championship Drag Racing" ) ]
    BurnoutRacing,

    /// The Elder Scrolls: Battlespire (1997)
    #[ strum( to_string = "The Elder Scrolls: Battlespire" ) ]
    Battlespire,

    /// The Elder Scrolls: Daggerfall (1996)
    #[ strum( to_string = "The Elder Scrolls: Daggerfall" ) ]
    Daggerfall,

    /// The Elder Scrolls: Redguard (1999)
    #[ strum( to_string = "The Elder Scrolls: Redguard" ) ]
    Redguard,

    /// NIRA Intense Import Drag Racing (1999)
    #[ strum( to_string = "NIRA Intense Import Drag Racing" ) ]
    NiraRacing,

    /// The Terminator: Future Shock (1995)
    #[ strum( to_string = "The Terminator: Future Shock" ) ]
    FutureShock,

    /// The Terminator: SkyNET (1996)
    #[ strum( to_string = "The Terminator: SkyNET" ) ]
    Skynet,

    /// The 10th Planet (cancelled)
    #[ strum( to_string = "The 10th Planet" ) ]
    TenthPlanet,

    /// XCar: Experimental Racing (1997)
    #[ strum( to_string = "XCar: Experimental Racing" ) ]
    Xcar,
}

impl Game {
    /// The asset folder profile of this title,
    /// None for titles nobody wrote one for yet.
    pub fn profile( self ) -> Option<&'static GameProfile> {
        profile::registry().iter()
            .find( |( game, _ )| *game == self )
            .map( |( _, profile )| *profile )
    }
}


#[ cfg( test ) ]
#[ allow( clippy::unwrap_used ) ]
mod test {

    use super::*;

    #[ test ]
    fn supported_titles_have_profiles() {
        assert!( Game::Daggerfall.profile().is_some() );
        assert!( Game::FutureShock.profile().is_some() );
        assert!( Game::Skynet.profile().is_none() );
        assert!( Game::Redguard.profile().is_none() );
    }

    #[ test ]
    fn display_is_the_full_title() {
        assert_eq! {
            Game::Daggerfall.to_string(),
            "The Elder Scrolls: Daggerfall"
        };
    }

}
