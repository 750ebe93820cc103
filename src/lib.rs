pub mod assemble;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod normalize;
pub mod pipeline;
pub mod providers;

pub use assemble::{GameAssembler, GameHeader};
pub use config::AppConfig;
pub use domain::{
    BodyPart, Competition, Direction, EndLocationSource, Game, Location, Period, Pitch, Player,
    Shot, ShotPattern, ShotResult, Side, Team,
};
pub use error::{PitchsideError, Result};
pub use fetch::{Fetcher, FixtureFetcher, HttpFetcher};
pub use normalize::{NormalizeOptions, ShotErrorPolicy};
pub use pipeline::Pipeline;
pub use providers::{Fotmob, Provider, ProviderKind, ProviderRequest, Understat};
