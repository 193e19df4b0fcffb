//! A lightweight actor framework with ordered deferred delivery.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod error;
mod handle;
mod mailbox;
mod scheduler;

pub use error::ActorDeadError;
pub use handle::Actor;
pub use mailbox::Message;

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::sync::oneshot;
    use tokio::time::sleep;

    use super::*;

    #[derive(Default)]
    struct RecorderState {
        values: Vec<u32>,
    }

    #[derive(Debug)]
    struct PushMessage(u32);

    impl Message<RecorderState> for PushMessage {
        fn handle(
            self,
            state: &mut RecorderState,
            _handle: &Actor<RecorderState>,
        ) {
            state.values.push(self.0);
        }
    }

    #[derive(Debug)]
    struct GetMessage(oneshot::Sender<Vec<u32>>);

    impl Message<RecorderState> for GetMessage {
        fn handle(
            self,
            state: &mut RecorderState,
            _handle: &Actor<RecorderState>,
        ) {
            self.0.send(state.values.clone()).unwrap();
        }
    }

    #[tokio::test]
    async fn test_send_message() {
        let actor = Actor::spawn(RecorderState::default(), None);
        actor.send(PushMessage(42)).unwrap();

        let (tx, rx) = oneshot::channel();
        actor.send(GetMessage(tx)).unwrap();
        assert_eq!(rx.await.unwrap(), vec![42]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deferred_messages_keep_submission_order() {
        let actor = Actor::spawn(RecorderState::default(), Some("recorder"));
        actor
            .send_after(Duration::from_millis(100), PushMessage(1))
            .unwrap();
        actor
            .send_after(Duration::from_millis(10), PushMessage(2))
            .unwrap();

        // Due immediately, but still queued behind the two above.
        let (tx, rx) = oneshot::channel();
        actor.send_after(Duration::ZERO, GetMessage(tx)).unwrap();
        assert_eq!(rx.await.unwrap(), vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_immediate_message_is_not_held_back() {
        let actor = Actor::spawn(RecorderState::default(), None);
        actor
            .send_after(Duration::from_millis(50), PushMessage(1))
            .unwrap();
        actor.send(PushMessage(2)).unwrap();

        let (tx, rx) = oneshot::channel();
        actor.send(GetMessage(tx)).unwrap();
        assert_eq!(rx.await.unwrap(), vec![2]);

        let (tx, rx) = oneshot::channel();
        actor.send_after(Duration::ZERO, GetMessage(tx)).unwrap();
        assert_eq!(rx.await.unwrap(), vec![2, 1]);
    }

    #[tokio::test]
    async fn test_unbounded_delay_does_not_stop_the_actor() {
        let actor = Actor::spawn(RecorderState::default(), None);
        actor.send_after(Duration::MAX, PushMessage(1)).unwrap();
        actor.send(PushMessage(2)).unwrap();

        let (tx, rx) = oneshot::channel();
        actor.send(GetMessage(tx)).unwrap();
        assert_eq!(rx.await.unwrap(), vec![2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_to_killed_actor() {
        let actor = Actor::spawn(RecorderState::default(), Some("recorder"));
        assert_eq!(actor.label(), Some("recorder"));
        actor
            .send_after(Duration::from_secs(10), PushMessage(1))
            .unwrap();
        actor.try_kill();
        sleep(Duration::from_millis(10)).await;

        let err = actor.send(PushMessage(2)).unwrap_err();
        assert_eq!(err.label(), Some("recorder"));
        assert_eq!(err.to_string(), "actor `recorder` is no longer running");
    }
}
