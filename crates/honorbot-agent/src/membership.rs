// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Participant bookkeeping performed for every processed event.
//!
//! Participants are registered the first time they are seen, their profile
//! snapshot is refreshed on every later event, and departures are kept as
//! `left` records rather than deleted.

use honorbot_core::{
    ChatId, HonorError, InboundEvent, Profile, UserFilter, UserRecord, UserUpdate,
};
use tracing::{debug, info};

use crate::context::HandlerContext;

/// Re-key the participants of a group that was upgraded to a supergroup.
pub async fn migrate(ctx: &HandlerContext, event: &InboundEvent) -> Result<(), HonorError> {
    let Some(to) = event.migrate_to else {
        return Ok(());
    };
    let outcome = ctx.storage.migrate_chat(event.chat_id, to).await?;
    info!(
        from = event.chat_id.0,
        to = to.0,
        moved = outcome.modified,
        "conversation migrated"
    );
    Ok(())
}

/// Record the sender, every joining member and the departing member.
pub async fn record_members(ctx: &HandlerContext, event: &InboundEvent) -> Result<(), HonorError> {
    observe(ctx, event.chat_id, &event.sender, false).await?;
    for member in &event.new_members {
        observe(ctx, event.chat_id, member, false).await?;
    }
    if let Some(member) = &event.left_member {
        observe(ctx, event.chat_id, member, true).await?;
    }
    Ok(())
}

async fn observe(
    ctx: &HandlerContext,
    chat_id: ChatId,
    profile: &Profile,
    left: bool,
) -> Result<(), HonorError> {
    if left && profile.id == ctx.bot.id {
        let outcome = ctx
            .storage
            .update_users(&UserFilter::chat(chat_id), &UserUpdate::left(true))
            .await?;
        info!(chat_id = chat_id.0, participants = outcome.matched, "bot left the conversation");
    }
    if profile.is_bot {
        return Ok(());
    }

    let filter = UserFilter::user(chat_id, profile.id);
    if ctx.storage.find_users(&filter).await?.is_empty() {
        ctx.storage
            .insert_user(&UserRecord::new(chat_id, profile.clone(), left))
            .await?;
        debug!(chat_id = chat_id.0, user_id = profile.id.0, left, "participant registered");
    } else {
        let update = UserUpdate {
            profile: Some(profile.clone()),
            left: Some(left),
            ..UserUpdate::default()
        };
        ctx.storage.update_user(&filter, &update).await?;
    }
    Ok(())
}
