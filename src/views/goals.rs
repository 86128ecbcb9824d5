use crate::{
    data::{habits, progress_overview, work_goals, Goal, Habit, ProgressOverview},
    state::Tab,
    views::{progress_bar, section_header, use_view},
};
use rivena::prelude::*;

const BAR_WIDTH: usize = 16;
const WEEKDAYS: [&str; 7] = ["M", "T", "W", "T", "F", "S", "S"];

fn overview_row(row: &ProgressOverview) -> Node {
    let bar_class = if row.label.contains("Habit") {
        "text-green-500"
    } else {
        "text-purple-500"
    };
    element! {
        div {
            div(class: "flex justify-between") {
                span(class: "text-gray-600") { #(Node::text(row.label)) }
                span(class: "font-medium") { #(Node::text(row.value)) }
            }
            span(class: bar_class) { #(Node::text(progress_bar(row.percent, BAR_WIDTH))) }
        }
    }
}

fn goal(goal: &Goal) -> Node {
    let tags = goal.tags.iter().map(|tag| {
        let class = if *tag == "Priority" {
            "bg-red-50 text-red-600 px-1"
        } else {
            "bg-blue-50 text-blue-600 px-1"
        };
        element!(span(class: class) { #(Node::text(*tag)) })
    });
    let milestones = goal
        .milestones
        .map(|n| element!(span(class: "text-gray-500") { #(Node::text(format!("{} milestones", n))) }));
    element! {
        div(class: "px-3 py-2 mx-2 border-l border-purple-500") {
            h4(class: "font-medium") { #(Node::text(goal.title)) }
            div(class: "flex items-center") {
                span(class: "text-purple-500") { #(Node::text(progress_bar(goal.progress, BAR_WIDTH))) }
                span(class: "ml-2 text-gray-500") { #(Node::text(format!("{}%", goal.progress))) }
            }
            div(class: "flex justify-between") {
                span(class: "text-gray-500") { #(Node::text(format!("Due: {}", goal.due_date))) }
                #(milestones)
            }
            div(class: "flex gap-4") { #(tags) }
        }
    }
}

fn habit(habit: &Habit) -> Node {
    let days = habit.days.iter().zip(WEEKDAYS).map(|(done, day)| {
        let (mark, class) = if *done {
            ("●", "text-green-500")
        } else {
            ("○", "text-gray-400")
        };
        element! {
            div(class: "flex-col items-center") {
                span(class: class) { #(Node::text(mark)) }
                span(class: "text-gray-500") { #(Node::text(day)) }
            }
        }
    });
    let stats = habit
        .stats
        .then(|| element!(span(class: "text-purple-600") { "View Stats" }));
    element! {
        div(class: "px-3 py-2 mx-2 border-l border-blue-500") {
            div(class: "flex justify-between") {
                h4(class: "font-medium") { #(Node::text(habit.title)) }
                span(class: "gap-2") {
                    span(class: "font-medium text-blue-600") { #(Node::text(habit.streak.to_string())) }
                    span(class: "text-gray-500") { "day streak" }
                }
            }
            div(class: "flex gap-4 my-1") { #(days) }
            div(class: "flex justify-between text-gray-500") {
                span { #(Node::text(format!("Target: {}", habit.target))) }
                #(stats)
            }
        }
    }
}

/// `GoalsContent` tracks progress on goals and habits.
pub struct GoalsContent;

impl Component for GoalsContent {
    fn render(&self, _props: Props, scope: &Scope<'_>) -> rivena::Result<Node> {
        let ctx = use_view(scope)?;
        let sidebar = &ctx.state.sidebar;
        let goals = work_goals();
        let habits = habits();

        let overview = sidebar.is_expanded(Tab::Goals, "overview").then(|| {
            element! {
                div(class: "px-3 py-2") {
                    div(class: "border px-3") {
                        div(class: "flex justify-between items-center") {
                            h4(class: "font-medium") { "Current Progress" }
                            span(class: "text-purple-600") { "View All" }
                        }
                        #(progress_overview().iter().map(overview_row))
                    }
                }
            }
        });
        let goal_list = sidebar
            .is_expanded(Tab::Goals, "workGoals")
            .then(|| element!(div(class: "flex-col gap-4 py-2") { #(goals.iter().map(goal)) }));
        let habit_list = sidebar
            .is_expanded(Tab::Goals, "habits")
            .then(|| element!(div(class: "flex-col gap-4 py-2") { #(habits.iter().map(habit)) }));

        Ok(element! {
            div {
                div(class: "flex justify-between items-center px-3 py-2") {
                    h3(class: "font-medium text-gray-700") { "Progress Tracking" }
                    span(class: "text-purple-600") { "⊕" }
                }
                #(section_header(ctx, Tab::Goals, "overview", "Current Progress", None))
                #(overview)
                #(section_header(ctx, Tab::Goals, "workGoals", "Work Goals", Some(format!("{} active", goals.len()))))
                #(goal_list)
                #(section_header(ctx, Tab::Goals, "habits", "Habits", Some(format!("{} active", habits.len()))))
                #(habit_list)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{state::AppState, views::test_support::*};

    #[test]
    fn test_goals_content() {
        let (ctx, _rx) = context(AppState::default());
        let text = render_view(&ctx, element!(GoalsContent), 48).to_string();
        assert!(text.contains("Progress Tracking"));
        assert!(text.contains("Active Goals"));
        assert!(text.contains("8 goals"));
        assert!(text.contains("Complete Project Presentation"));
        assert!(text.contains("█████████████░░░ 80%"));
        assert!(text.contains("Due: Jun 30, 2024"));
        assert!(text.contains("3 milestones"));
        assert!(text.contains("Morning Meditation"));
        assert!(text.contains("30 day streak"));
        assert!(text.contains("Target: Daily, 10 minutes"));
        assert!(text.contains("2 active"));
    }

    #[test]
    fn test_collapsed_habits() {
        let mut state = AppState::default();
        state.sidebar.toggle(Tab::Goals, "habits").unwrap();
        let (ctx, _rx) = context(state);
        let text = render_view(&ctx, element!(GoalsContent), 48).to_string();
        assert!(text.contains("Habits"));
        assert!(!text.contains("Morning Meditation"));
    }
}
