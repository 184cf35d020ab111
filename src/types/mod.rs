//! Push platform types
//!
//! Types crossing the push platform seam: the subscription a platform
//! hands back and the messages the worker bridge delivers.

mod push;

pub use push::{
    PushSubscription, SubscribeOptions, SubscriptionKeys, WorkerMessage,
};
