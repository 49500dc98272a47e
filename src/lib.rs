//! A frame-stepped Tetris engine
//!
//! The driver calls [`GameMaster::tick`] once per frame with a timestamp and
//! the held state of every button, then reads the snapshot accessors to
//! render. The engine does no I/O and never renders anything itself.
//!
//! ```
//! use std::time::Duration;
//! use tetris_engine::{EngineConfig, GameMaster, Input};
//!
//! let config = EngineConfig::new(20, 10, 6, 4, 4, true, false).with_seed(1);
//! let mut game = GameMaster::new(config).unwrap();
//! game.tick(Duration::ZERO, Input { hard_drop: true, ..Input::default() });
//! assert_eq!(game.field().len(), 200);
//! assert_eq!(game.num_deleted_lines(), 0);
//! ```

pub mod bag;
pub mod error;
pub mod field;
pub mod game;
pub mod hold;
pub mod input;
pub mod piece;
pub mod queue;
pub mod score;
pub mod settings;
pub mod snapshot;
pub mod srs;
pub mod tetromino;

pub use bag::RandomBag;
pub use error::ConfigError;
pub use field::{Cell, Field};
pub use game::{GameMaster, GameState};
pub use hold::HoldSlot;
pub use input::Input;
pub use piece::ActivePiece;
pub use queue::NextQueue;
pub use score::Score;
pub use settings::EngineConfig;
pub use snapshot::Snapshot;
pub use tetromino::{PieceType, Rgb, Rotation, RotationDirection};
