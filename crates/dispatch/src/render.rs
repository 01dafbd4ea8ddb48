//! Message rendering — one pure function per event kind.
//!
//! The dispatcher resolves any required user record first, so everything in
//! here is plain string building with no I/O. The two verb tables (reminder
//! vs. performed-action) are deliberately independent: the reminder nags with
//! "sent your songs" while the action announcement says "sent a song".

use crescendo_common::types::{Group, Stage, User};

/// Reminder that a period is about to end, or — at zero hours — that the
/// submission period just ended and voting is open. The zero-hour message is
/// fixed regardless of stage.
pub fn period_about_to_finish(hours: u32, stage: Stage, group: &Group) -> String {
    if hours == 0 {
        return format!(
            "Submission period just finished in {}.\n\nEveryone can already start voting!",
            group.name
        );
    }

    let action = match stage {
        Stage::Evaluation => "voted",
        Stage::Submission => "sent your songs",
    };

    format!(
        "{} period will finish in less than {}h in {}.\n\nIf you haven't {} yet do it quickly!",
        capitalize(&stage.to_string()),
        hours,
        group.name,
        action
    )
}

/// Round-over announcement naming the winner.
pub fn evaluation_period_finished(group: &Group, winner: &User) -> String {
    format!(
        "Round just finished in {}. The winner was {}\n\n\
         Congratulations, {}!\n\n\
         Everyone can already send a song for the new round.",
        group.name, winner.display_name, winner.display_name
    )
}

/// Announcement that a member submitted or voted.
pub fn user_performed_action(user: &User, stage: Stage, group: &Group) -> String {
    let action = match stage {
        Stage::Evaluation => "voted",
        Stage::Submission => "sent a song",
    };

    format!(
        "User {} just {} in {}.",
        user.display_name, action, group.name
    )
}

/// Upper-case the first character, leave the rest untouched.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
