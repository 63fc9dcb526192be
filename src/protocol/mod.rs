//! Wire protocol: inbound line classification, event types, and outbound commands.

pub mod classify;
pub mod command;
pub mod event;

pub use classify::{classify, Classified};
pub use command::Command;
pub use event::{
    ClientEvent, CloseReason, ClosedEvent, NamesEvent, PrivateMessageEvent, TopicEvent,
    UnhandledEvent,
};
