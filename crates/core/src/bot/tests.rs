use std::sync::{Arc, Mutex};
use std::time::Duration;

use recovery_bot_model::{Phase, Sender, Sentiment};
use recovery_bot_test_picker::FirstPicker;
use tokio::sync::watch;
use tokio::time::{sleep, timeout};

use crate::{ErrorKind, RecoveryBot, RecoveryBotBuilder, ResponseTable};

struct Harness {
    bot: RecoveryBot,
    idle_rx: watch::Receiver<usize>,
    seen: Arc<Mutex<Vec<(Sender, String)>>>,
}

impl Harness {
    fn new() -> Self {
        let (idle_tx, idle_rx) = watch::channel(0);
        let seen = Arc::new(Mutex::new(vec![]));
        let bot = RecoveryBotBuilder::new()
            .with_reply_picker(FirstPicker)
            .on_message({
                let seen = Arc::clone(&seen);
                move |msg| {
                    seen.lock()
                        .unwrap()
                        .push((msg.sender(), msg.content().to_owned()));
                }
            })
            .on_idle(move || {
                idle_tx.send_modify(|count| *count += 1);
            })
            .build();
        Self { bot, idle_rx, seen }
    }

    async fn wait_idle(&mut self, count: usize) {
        timeout(
            Duration::from_secs(10),
            self.idle_rx.wait_for(|idle| *idle >= count),
        )
        .await
        .unwrap()
        .unwrap();
    }
}

fn first_reply(phase: Phase, sentiment: Sentiment) -> String {
    ResponseTable::default().candidates(phase, sentiment)[0].clone()
}

#[tokio::test(start_paused = true)]
async fn test_recovery_conversation() {
    let mut harness = Harness::new();
    let transcript = harness.bot.snapshot().await.unwrap();
    assert_eq!(transcript.len(), 1);
    assert!(transcript.messages()[0].is_bot());

    harness
        .bot
        .send_message("the product is rubbish and broken")
        .unwrap();
    harness.wait_idle(1).await;

    let transcript = harness.bot.snapshot().await.unwrap();
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript.phase(), Phase::Understanding);
    assert_eq!(transcript.sentiment(), Sentiment::Negative);
    assert_eq!(
        transcript.messages()[1].sentiment(),
        Some(Sentiment::Negative)
    );
    assert_eq!(
        transcript.messages()[2].content(),
        first_reply(Phase::Understanding, Sentiment::Negative),
    );

    harness
        .bot
        .send_message("thanks, it's fixed now, works great")
        .unwrap();
    harness.wait_idle(2).await;

    let transcript = harness.bot.snapshot().await.unwrap();
    assert_eq!(transcript.len(), 5);
    assert_eq!(transcript.phase(), Phase::Resolved);
    assert_eq!(transcript.sentiment(), Sentiment::Positive);
    assert_eq!(
        transcript.messages()[3].sentiment(),
        Some(Sentiment::Positive)
    );
    // The resolved phase answers from the initial replies.
    assert_eq!(
        transcript.messages()[4].content(),
        first_reply(Phase::Initial, Sentiment::Positive),
    );
    for message in transcript.messages() {
        assert_eq!(message.is_bot(), message.sentiment().is_none());
    }

    // The greeting is already in place before the callback is attached.
    assert_eq!(harness.seen.lock().unwrap().len(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_reply_is_deferred() {
    let mut harness = Harness::new();
    harness.bot.send_message("it is okay").unwrap();

    let transcript = harness.bot.snapshot().await.unwrap();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript.last().unwrap().sender(), Sender::User);

    harness.wait_idle(1).await;
    let transcript = harness.bot.snapshot().await.unwrap();
    assert_eq!(transcript.len(), 3);
    assert!(transcript.last().unwrap().is_bot());
}

#[tokio::test(start_paused = true)]
async fn test_type_ahead_keeps_reply_order() {
    let mut harness = Harness::new();
    harness.bot.send_message("this is terrible").unwrap();
    sleep(Duration::from_millis(300)).await;
    harness.bot.send_message("still awful").unwrap();
    harness.wait_idle(1).await;

    let seen = harness.seen.lock().unwrap().clone();
    assert_eq!(
        seen,
        vec![
            (Sender::User, "this is terrible".to_owned()),
            (Sender::User, "still awful".to_owned()),
            (
                Sender::Bot,
                first_reply(Phase::Understanding, Sentiment::Negative)
            ),
            (Sender::Bot, first_reply(Phase::Resolving, Sentiment::Negative)),
        ]
    );

    let transcript = harness.bot.snapshot().await.unwrap();
    assert_eq!(transcript.phase(), Phase::Resolving);
    assert_eq!(*harness.idle_rx.borrow(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_blank_input_is_rejected() {
    let harness = Harness::new();
    let err = harness.bot.send_message("  \t ").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyInput);

    let transcript = harness.bot.snapshot().await.unwrap();
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript.phase(), Phase::Initial);
}

#[tokio::test(start_paused = true)]
async fn test_closed_session() {
    let harness = Harness::new();
    harness.bot.send_message("broken again").unwrap();
    // Make sure the turn is applied before the session goes away.
    harness.bot.snapshot().await.unwrap();
    harness.bot.close();
    sleep(Duration::from_secs(5)).await;

    let err = harness.bot.send_message("hello?").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SessionClosed);
    assert!(harness.bot.snapshot().await.is_err());
    // The pending reply was dropped with the session.
    assert_eq!(harness.seen.lock().unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_the_session_drops_pending_replies() {
    let harness = Harness::new();
    harness.bot.send_message("broken again").unwrap();
    harness.bot.snapshot().await.unwrap();
    let Harness { bot, seen, .. } = harness;
    drop(bot);
    sleep(Duration::from_secs(5)).await;

    // Only the user message made it out.
    let seen = seen.lock().unwrap().clone();
    assert_eq!(seen, vec![(Sender::User, "broken again".to_owned())]);
}

#[tokio::test]
async fn test_huge_typing_delay_keeps_the_session_alive() {
    let bot = RecoveryBotBuilder::new()
        .with_reply_picker(FirstPicker)
        .with_typing_delay(Duration::MAX)
        .build();
    bot.send_message("this is rubbish").unwrap();
    let transcript = bot.snapshot().await.unwrap();
    assert_eq!(transcript.len(), 2);

    bot.send_message("hello?").unwrap();
    let transcript = bot.snapshot().await.unwrap();
    assert_eq!(transcript.len(), 3);
    assert!(!transcript.last().unwrap().is_bot());
}

#[tokio::test]
async fn test_custom_session() {
    let (idle_tx, mut idle_rx) = watch::channel(false);
    let bot = RecoveryBotBuilder::new()
        .without_greeting()
        .with_initial_sentiment(Sentiment::Neutral)
        .with_typing_delay(Duration::from_millis(1))
        .on_idle(move || {
            idle_tx.send(true).unwrap();
        })
        .build();
    bot.send_message("hmm").unwrap();

    timeout(Duration::from_millis(500), idle_rx.wait_for(|v| *v))
        .await
        .unwrap()
        .unwrap();
    let transcript = bot.snapshot().await.unwrap();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript.messages()[0].id(), 1);
    // A neutral turn only moves the phase when the customer was negative.
    assert_eq!(transcript.phase(), Phase::Initial);
}
