// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The agent loop end to end: channel in, queue, dispatch, channel out.

use std::sync::Arc;
use std::time::Duration;

use honorbot_agent::{AgentLoop, HandlerContext};
use honorbot_config::model::HonorConfig;
use honorbot_core::{ChannelAdapter, ChatId, Clock, SystemClock};
use honorbot_test_utils::{MockChannel, TempStore, sample_event};
use tokio_util::sync::CancellationToken;

async fn wait_for_sends(channel: &MockChannel, count: usize) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while channel.sent_count().await < count {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("expected messages were not sent in time");
}

async fn start() -> (TempStore, Arc<MockChannel>, Arc<AgentLoop>) {
    let store = TempStore::open().await.unwrap();
    let channel = Arc::new(MockChannel::new());
    let mut config = HonorConfig::default();
    config.election.tip_probability = 0.0;
    let identity = channel.identity().await.unwrap();
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let ctx = HandlerContext::new(channel.clone(), store.storage.clone(), clock, &config, identity);
    let agent = Arc::new(AgentLoop::new(ctx, Duration::from_secs(5)));
    (store, channel, agent)
}

#[tokio::test]
async fn events_flow_through_the_loop_in_order() {
    let (_store, channel, agent) = start().await;
    let cancel = CancellationToken::new();
    let runner = {
        let agent = agent.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move { agent.run(cancel).await })
    };

    channel.inject_event(sample_event(-1, 1, "/members")).await;
    channel.inject_event(sample_event(-1, 2, "/members")).await;
    channel.inject_event(sample_event(-2, 3, "/top")).await;
    wait_for_sends(&channel, 3).await;

    let group = channel.sent_texts(ChatId(-1)).await;
    assert_eq!(group.len(), 2);
    assert_eq!(group[0], "Все участники:\n✅ [User1](tg://user?id=1) — /remove1");
    assert!(group[1].ends_with("✅ [User2](tg://user?id=2) — /remove2"));

    cancel.cancel();
    runner.await.unwrap().unwrap();
    assert!(agent.queue().is_idle(ChatId(-1)));
}

#[tokio::test]
async fn a_failing_event_does_not_block_the_next_one() {
    let (_store, channel, agent) = start().await;
    let cancel = CancellationToken::new();
    let runner = {
        let agent = agent.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move { agent.run(cancel).await })
    };

    channel.fail_next_sends(1);
    channel.inject_event(sample_event(-1, 1, "/help")).await;
    channel.inject_event(sample_event(-1, 1, "/members")).await;
    wait_for_sends(&channel, 1).await;

    let texts = channel.sent_texts(ChatId(-1)).await;
    assert_eq!(texts, vec!["Все участники:\n✅ [User1](tg://user?id=1) — /remove1"]);

    cancel.cancel();
    runner.await.unwrap().unwrap();
}

#[tokio::test]
async fn cancelling_disconnects_the_channel() {
    let (_store, channel, agent) = start().await;
    let cancel = CancellationToken::new();
    cancel.cancel();
    agent.run(cancel).await.unwrap();

    assert!(channel.receive().await.unwrap_err().is_channel_closed());
}

#[tokio::test]
async fn closed_channel_stops_the_loop_after_buffered_events() {
    let (_store, channel, agent) = start().await;
    channel.inject_event(sample_event(-1, 1, "/members")).await;
    channel.disconnect().await.unwrap();

    tokio::time::timeout(Duration::from_secs(5), agent.run(CancellationToken::new()))
        .await
        .expect("loop did not stop on a closed channel")
        .unwrap();

    assert_eq!(
        channel.sent_texts(ChatId(-1)).await,
        vec!["Все участники:\n✅ [User1](tg://user?id=1) — /remove1"]
    );
}
