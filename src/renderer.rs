//! Immediate-mode DOM markup
//!
//! The whole track is rebuilt from a snapshot every frame. Live obstacle
//! counts are small, so there is no diffing. Nothing here touches run state.

use std::fmt::Write;

use crate::sim::{Obstacle, RunSnapshot, TerminalReason, obstacle_hitbox, player_hitbox};
use crate::tuning::RunnerTuning;

/// Escape text for inclusion in HTML
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn obstacle_markup(out: &mut String, obstacle: &Obstacle) {
    let b = obstacle.bounds();
    let class = if obstacle.is_danger {
        "obstacle danger"
    } else {
        "obstacle"
    };
    let _ = write!(
        out,
        r#"<div class="{}" style="left:{:.2}%;top:{:.2}%;width:{:.2}%;height:{:.2}%">{}</div>"#,
        class,
        b.min.x,
        b.min.y,
        b.size().x,
        b.size().y,
        escape_html(&obstacle.label)
    );
}

fn hitbox_markup(out: &mut String, min_x: f32, min_y: f32, w: f32, h: f32) {
    let _ = write!(
        out,
        r#"<div class="hitbox" style="left:{:.2}%;top:{:.2}%;width:{:.2}%;height:{:.2}%"></div>"#,
        min_x, min_y, w, h
    );
}

/// Markup for all obstacles (plus hitbox outlines when requested)
pub fn track_markup(snapshot: &RunSnapshot, tuning: &RunnerTuning, show_hitboxes: bool) -> String {
    let mut out = String::with_capacity(snapshot.obstacles.len() * 128);
    for obstacle in &snapshot.obstacles {
        obstacle_markup(&mut out, obstacle);
    }
    if show_hitboxes {
        for obstacle in &snapshot.obstacles {
            let hb = obstacle_hitbox(tuning, obstacle);
            hitbox_markup(&mut out, hb.min.x, hb.min.y, hb.size().x, hb.size().y);
        }
        let hb = player_hitbox(tuning, snapshot.player_y);
        hitbox_markup(&mut out, hb.min.x, hb.min.y, hb.size().x, hb.size().y);
    }
    out
}

/// End-screen title and icon for a terminal reason
pub fn terminal_banner(reason: TerminalReason) -> (&'static str, &'static str) {
    match reason {
        TerminalReason::Success => ("真相送达 (Truth Delivered)", "🏆"),
        TerminalReason::Collision => ("报道被拦截 (Story Blocked)", "⚠️"),
    }
}
