//! Formatting shared by the public view and the admin screens.

use crate::models::{ContactMessage, Experience, Skill};
use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// `2020-01-15` → `Jan 2020`.
pub fn month_year(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

/// `Jan 2020 - Present` for ongoing positions, `Jan 2020 - Mar 2022` otherwise.
pub fn period(exp: &Experience) -> String {
    let end = exp.end_date.map(month_year).unwrap_or_else(|| "Present".to_string());
    format!("{} - {}", month_year(exp.start_date), end)
}

/// Skills grouped by category, categories in order of first appearance.
pub fn group_by_category(skills: &[Skill]) -> Vec<(String, Vec<Skill>)> {
    let mut groups: Vec<(String, Vec<Skill>)> = Vec::new();
    for skill in skills {
        match groups.iter_mut().find(|(c, _)| *c == skill.category) {
            Some((_, members)) => members.push(skill.clone()),
            None => groups.push((skill.category.clone(), vec![skill.clone()])),
        }
    }
    groups
}

/// Received-at line of a message in the inbox, 12-hour clock: `Mar 5, 2024, 02:07 PM`.
pub fn message_timestamp(at: &DateTime<Utc>) -> String {
    at.format("%b %-d, %Y, %I:%M %p").to_string()
}

pub fn unread_count(messages: &[ContactMessage]) -> usize {
    messages.iter().filter(|m| !m.read).count()
}

/// `None` when everything is read, otherwise `"1 unread message"` / `"3 unread messages"`.
pub fn unread_label(messages: &[ContactMessage]) -> Option<String> {
    match unread_count(messages) {
        0 => None,
        1 => Some("1 unread message".to_string()),
        n => Some(format!("{} unread messages", n)),
    }
}

pub fn copyright(owner: &str, now: DateTime<Utc>) -> String {
    format!("© {} {}. All rights reserved.", now.year(), owner)
}
