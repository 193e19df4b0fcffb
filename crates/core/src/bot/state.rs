use recovery_bot_actor::{Actor, Message};
use tokio::sync::oneshot;

use super::BotState;
use crate::transcript::Transcript;

impl BotState {
    fn take_user_turn(&mut self, text: String, handle: &Actor<Self>) {
        let turn = self.transcript.apply_user_turn(&self.classifier, &text);
        debug!(
            "user turn #{}: {} ({} / {})",
            turn.message_id, turn.sentiment, turn.phase, turn.aggregate
        );
        self.notify_last_message();

        let reply = self
            .responder
            .select_reply(turn.phase, turn.sentiment)
            .to_owned();
        match handle.send_after(self.typing_delay, DeliverReply(reply)) {
            Ok(()) => self.pending_replies += 1,
            Err(err) => warn!("cannot schedule the reply: {err}"),
        }
    }

    fn deliver_reply(&mut self, reply: String) {
        self.transcript.push_bot_message(reply);
        self.notify_last_message();

        self.pending_replies = self.pending_replies.saturating_sub(1);
        if self.pending_replies > 0 {
            trace!("{} replies still pending", self.pending_replies);
            return;
        }
        if let Some(on_idle) = &self.on_idle {
            on_idle();
        }
    }

    #[inline]
    fn notify_last_message(&self) {
        let (Some(on_message), Some(msg)) =
            (&self.on_message, self.transcript.last())
        else {
            return;
        };
        on_message(msg);
    }
}

#[derive(Debug)]
pub struct UserTurn(pub String);

impl Message<BotState> for UserTurn {
    fn handle(self, state: &mut BotState, handle: &Actor<BotState>) {
        state.take_user_turn(self.0, handle);
    }
}

#[derive(Debug)]
struct DeliverReply(String);

impl Message<BotState> for DeliverReply {
    #[inline]
    fn handle(self, state: &mut BotState, _handle: &Actor<BotState>) {
        state.deliver_reply(self.0);
    }
}

#[derive(Debug)]
pub struct TakeSnapshot(pub oneshot::Sender<Transcript>);

impl Message<BotState> for TakeSnapshot {
    #[inline]
    fn handle(self, state: &mut BotState, _handle: &Actor<BotState>) {
        self.0.send(state.transcript.clone()).ok();
    }
}
