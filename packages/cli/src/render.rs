//! Plain-text rendering for terminal output

use chrono::{DateTime, Utc};
use coursedesk_core::aggregates::{format_duration, CurriculumStats};
use coursedesk_core::models::{Coupon, Curriculum, LessonBody};
use std::fmt::Write;

/// Indented outline of sections and lessons followed by a summary line
pub fn curriculum(tree: &Curriculum) -> String {
    let mut out = String::new();
    for section in tree.sections() {
        let _ = writeln!(
            out,
            "{}. {} [{}]",
            section.order + 1,
            section.title,
            format_duration(section.duration())
        );
        for lesson in &section.lessons {
            let preview = if lesson.is_preview { " (preview)" } else { "" };
            let _ = writeln!(
                out,
                "   {}.{} {} - {}, {}{}",
                section.order + 1,
                lesson.order + 1,
                lesson.title,
                lesson.lesson_type,
                format_duration(u64::from(lesson.duration)),
                preview
            );
            if let LessonBody::Video { url: None, .. } = lesson.body() {
                let _ = writeln!(out, "       ! no video URL");
            }
        }
    }
    let _ = write!(out, "{}", CurriculumStats::of(tree));
    out
}

/// One line per coupon with its status at `now`
pub fn coupons(coupons: &[Coupon], now: DateTime<Utc>) -> String {
    if coupons.is_empty() {
        return "No coupons".to_string();
    }
    coupons
        .iter()
        .map(|coupon| {
            format!(
                "{:<16} {:>3}% off  {:>4}/{:<4} used  {}",
                coupon.code,
                coupon.discount,
                coupon.used_count,
                coupon.max_uses,
                coupon.status_at(now)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
