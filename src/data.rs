//! The sample content shown in the sidebar tabs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A team shown by the team switcher.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Team {
    pub name: &'static str,
    pub plan: &'static str,
}

pub fn teams() -> Vec<Team> {
    vec![Team {
        name: "Rivena AI",
        plan: "Your Companion",
    }]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationKind {
    Chat,
    Voice,
    Summary,
}

impl ConversationKind {
    /// A one-cell marker for the kind.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Chat => "✉",
            Self::Voice => "☎",
            Self::Summary => "✦",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conversation {
    pub title: &'static str,
    pub time: &'static str,
    pub description: &'static str,
    pub kind: ConversationKind,
    pub tags: Vec<&'static str>,
    pub duration: Option<&'static str>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimelineSection {
    pub id: &'static str,
    pub title: &'static str,
    pub conversations: Vec<Conversation>,
}

pub fn timeline_sections() -> Vec<TimelineSection> {
    vec![
        TimelineSection {
            id: "today",
            title: "Today",
            conversations: vec![
                Conversation {
                    title: "Morning Check-in",
                    time: "9:15 AM",
                    description: "Discussed goals for the week, focusing on your presentation and workout schedule. Set reminders for gym sessions.",
                    kind: ConversationKind::Chat,
                    tags: vec!["Work", "Exercise"],
                    duration: None,
                },
                Conversation {
                    title: "Voice Session",
                    time: "12:30 PM",
                    description: "12-minute conversation about managing work stress and balancing priorities.",
                    kind: ConversationKind::Voice,
                    tags: vec![],
                    duration: Some("12 min"),
                },
                Conversation {
                    title: "Afternoon Reflections",
                    time: "3:45 PM",
                    description: "Shared thoughts about the book \"Atomic Habits\" and how to apply its principles to daily routine.",
                    kind: ConversationKind::Chat,
                    tags: vec!["Reading", "Habits"],
                    duration: None,
                },
            ],
        },
        TimelineSection {
            id: "yesterday",
            title: "Yesterday",
            conversations: vec![
                Conversation {
                    title: "Daily Summary",
                    time: "Jun 24",
                    description: "3 conversations throughout the day covering work projects, meditation practice, and weekend plans.",
                    kind: ConversationKind::Summary,
                    tags: vec![],
                    duration: None,
                },
                Conversation {
                    title: "Voice Session",
                    time: "8:20 PM",
                    description: "18-minute conversation about upcoming travel plans to Europe and packing recommendations.",
                    kind: ConversationKind::Voice,
                    tags: vec![],
                    duration: Some("18 min"),
                },
            ],
        },
    ]
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Goal {
    pub title: &'static str,
    /// Percent complete, 0 to 100.
    pub progress: u8,
    pub due_date: &'static str,
    pub tags: Vec<&'static str>,
    pub milestones: Option<u32>,
}

pub fn work_goals() -> Vec<Goal> {
    vec![
        Goal {
            title: "Complete Project Presentation",
            progress: 80,
            due_date: "Jun 30, 2024",
            tags: vec!["Work", "Priority"],
            milestones: Some(3),
        },
        Goal {
            title: "Complete Data Analysis Course",
            progress: 45,
            due_date: "Jul 15, 2024",
            tags: vec!["Work", "Learning"],
            milestones: None,
        },
    ]
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Habit {
    pub title: &'static str,
    pub streak: u32,
    pub target: &'static str,
    /// Completion for each day of the week, Monday first.
    pub days: [bool; 7],
    pub stats: bool,
}

pub fn habits() -> Vec<Habit> {
    vec![
        Habit {
            title: "Morning Meditation",
            streak: 30,
            target: "Daily, 10 minutes",
            days: [true, true, true, true, true, true, false],
            stats: true,
        },
        Habit {
            title: "Reading",
            streak: 12,
            target: "5 days/week, 20 pages",
            days: [true, true, true, true, false, true, false],
            stats: true,
        },
    ]
}

/// The summary figures at the top of the goals tab.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressOverview {
    pub label: &'static str,
    pub value: &'static str,
    /// Fill of the progress bar, 0 to 100.
    pub percent: u8,
}

pub fn progress_overview() -> Vec<ProgressOverview> {
    vec![
        ProgressOverview {
            label: "Active Goals",
            value: "8 goals",
            percent: 65,
        },
        ProgressOverview {
            label: "Habit Consistency",
            value: "87%",
            percent: 87,
        },
    ]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryKind {
    Fact,
    Preference,
    Goal,
    Insight,
    Achievement,
}

impl MemoryKind {
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Fact => "●",
            Self::Preference => "♥",
            Self::Goal => "◎",
            Self::Insight => "✧",
            Self::Achievement => "★",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Memory {
    pub id: &'static str,
    pub content: &'static str,
    pub kind: MemoryKind,
    /// How sure the assistant is, 0 to 1.
    pub confidence: f32,
    pub learned_at: NaiveDate,
    pub sources: Vec<&'static str>,
}

impl Memory {
    /// The confidence as a rounded percentage.
    pub fn confidence_percent(&self) -> u32 {
        (self.confidence * 100.0).round() as u32
    }

    /// When the memory was learned, like `Learned Feb 15`.
    pub fn learned_label(&self) -> String {
        format!("Learned {}", self.learned_at.format("%b %-d"))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MemoryCategory {
    pub key: &'static str,
    pub label: &'static str,
    pub items: Vec<Memory>,
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn memory(
    id: &'static str,
    content: &'static str,
    kind: MemoryKind,
    confidence: f32,
    learned_at: NaiveDate,
    sources: Vec<&'static str>,
) -> Memory {
    Memory {
        id,
        content,
        kind,
        confidence,
        learned_at,
        sources,
    }
}

pub fn memory_categories() -> Vec<MemoryCategory> {
    use MemoryKind::*;
    vec![
        MemoryCategory {
            key: "facts",
            label: "Personal Facts",
            items: vec![
                memory("fact-1", "Your sister Emma lives in Boston and works as a graphic designer", Fact, 0.95, date(2024, 2, 15), vec!["session-123"]),
                memory("fact-2", "You're allergic to peanuts but not other nuts", Fact, 0.88, date(2024, 2, 10), vec!["session-125"]),
            ],
        },
        MemoryCategory {
            key: "preferences",
            label: "Preferences",
            items: vec![
                memory("pref-1", "You prefer science fiction and historical fiction books", Preference, 0.85, date(2024, 2, 20), vec!["session-128"]),
                memory("pref-2", "You enjoy yoga and running for exercise", Preference, 0.78, date(2024, 2, 5), vec!["session-118"]),
            ],
        },
        MemoryCategory {
            key: "goals",
            label: "Goals & Projects",
            items: vec![
                memory("goal-1", "Training for a half marathon in September", Goal, 0.9, date(2024, 2, 18), vec!["session-127"]),
                memory("goal-2", "Learning Spanish with a goal of basic conversation by summer", Goal, 0.85, date(2024, 1, 15), vec!["session-105"]),
            ],
        },
        MemoryCategory {
            key: "insights",
            label: "Insights & Patterns",
            items: vec![
                memory("insight-1", "You tend to procrastinate when feeling overwhelmed rather than breaking tasks down", Insight, 0.75, date(2024, 2, 12), vec!["session-122", "session-124"]),
                memory("insight-2", "Your mood improves significantly after morning exercise", Insight, 0.82, date(2024, 2, 8), vec!["session-119", "session-121"]),
            ],
        },
        MemoryCategory {
            key: "achievements",
            label: "Achievements",
            items: vec![
                memory("achievement-1", "Meditated consistently for 30 days in a row", Achievement, 0.95, date(2024, 2, 22), vec!["session-130"]),
                memory("achievement-2", "Completed your first 10K race last month", Achievement, 0.98, date(2024, 1, 30), vec!["session-115"]),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_labels() {
        let categories = memory_categories();
        assert_eq!(categories.len(), 5);
        let fact = &categories[0].items[0];
        assert_eq!(fact.learned_label(), "Learned Feb 15");
        assert_eq!(fact.confidence_percent(), 95);
        assert_eq!(categories[3].items[0].confidence_percent(), 75);
        assert_eq!(categories[1].items[1].learned_label(), "Learned Feb 5");
    }

    #[test]
    fn test_timeline_sections() {
        let sections = timeline_sections();
        assert_eq!(
            sections.iter().map(|s| s.id).collect::<Vec<_>>(),
            vec!["today", "yesterday"]
        );
        assert!(sections[0].conversations[1].duration.is_some());
    }
}
