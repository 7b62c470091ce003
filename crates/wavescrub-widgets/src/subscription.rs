//! Subscription helper for bridging sync channels to iced subscriptions
//!
//! The envelope loader runs on a plain background thread and reports over
//! `std::sync::mpsc`. This module converts such a receiver into an iced
//! `Subscription` so fetch completions arrive as ordinary messages.
//!
//! # Usage
//!
//! ```ignore
//! fn subscription(&self) -> Subscription<Message> {
//!     Subscription::batch([
//!         mpsc_subscription(self.loader.result_receiver())
//!             .map(Message::EnvelopeLoaded),
//!         // ... other subscriptions
//!     ])
//! }
//! ```

use std::any::TypeId;
use std::hash::Hash;
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex};

use iced::advanced::subscription::{self, EventStream, Hasher, Recipe};
use iced::futures::stream::BoxStream;
use iced::Subscription;

/// Recipe for polling an mpsc receiver as an iced subscription.
struct MpscRecipe<T> {
    /// Unique ID for subscription identity (receiver pointer)
    id: u64,
    receiver: Arc<Mutex<Receiver<T>>>,
}

impl<T: Send + 'static> Recipe for MpscRecipe<T> {
    type Output = T;

    fn hash(&self, state: &mut Hasher) {
        TypeId::of::<Self>().hash(state);
        self.id.hash(state);
    }

    fn stream(self: Box<Self>, _input: EventStream) -> BoxStream<'static, Self::Output> {
        let receiver = self.receiver;

        Box::pin(iced::futures::stream::unfold(receiver, |rx| async move {
            loop {
                if let Some(item) = rx.lock().ok().and_then(|r| r.try_recv().ok()) {
                    return Some((item, rx));
                }

                // Small sleep to avoid busy-spinning while remaining
                // responsive; 1ms is far below envelope fetch latency
                tokio::time::sleep(std::time::Duration::from_millis(1)).await;
            }
        }))
    }
}

/// Create an iced subscription from a sync mpsc channel receiver.
///
/// The receiver is Arc-wrapped so the host can hand out a clone on every
/// `subscription()` call while the recipe keeps a stable identity (the
/// Arc pointer). Use `.map()` to convert the yielded items to your
/// message type.
pub fn mpsc_subscription<T>(receiver: Arc<Mutex<Receiver<T>>>) -> Subscription<T>
where
    T: Send + 'static,
{
    let id = Arc::as_ptr(&receiver) as u64;

    subscription::from_recipe(MpscRecipe { id, receiver })
}
