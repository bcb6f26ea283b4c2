pub use self::{game::GameScreen, home::HomeScreen};

mod game;
mod home;
