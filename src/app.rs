//! Application context: owns the [`Document`], applies intents and hands
//! snapshots to the save queue.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

use crate::error::TasquestError;
use crate::graph::{self, TreeNode};
use crate::models::{is_valid_title, new_id, Document, Goal, Milestone, Task};
use crate::rules::{self, scoring, Transition};
use crate::store::{DocumentStore, SaveQueue};

/// Every way the document may be changed. Ids accept a unique prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    CreateTask {
        title: String,
        parent_id: Option<String>,
        deadline: Option<NaiveDateTime>,
    },
    EditTask {
        id: String,
        edit: TaskEdit,
    },
    DeleteTask {
        id: String,
    },
    ToggleTask {
        id: String,
    },
    CreateGoal {
        title: String,
    },
    EditGoal {
        id: String,
        title: String,
    },
    AddMilestone {
        goal_id: String,
        title: String,
    },
    EditMilestone {
        goal_id: String,
        milestone_id: String,
        title: String,
    },
    ToggleMilestone {
        goal_id: String,
        milestone_id: String,
    },
    ToggleGoal {
        id: String,
    },
}

/// Field updates for a task. `None` leaves a field alone; `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEdit {
    pub title: Option<String>,
    pub deadline: Option<Option<NaiveDateTime>>,
    pub parent_id: Option<Option<String>>,
}

/// Fire-and-forget notifications for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    Celebrate { transition: Transition, title: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Full id of the task, goal or milestone the intent acted on.
    pub id: String,
    pub title: String,
    pub transition: Option<Transition>,
    /// A milestone completion also closed its goal.
    pub auto_closed: bool,
    pub points: u64,
    pub events: Vec<Event>,
}

pub struct App {
    doc: Document,
    saves: SaveQueue,
}

impl App {
    /// Load the document (falling back to empty) and start the save worker.
    pub fn open(store: Box<dyn DocumentStore>) -> Self {
        let doc = store.load();
        tracing::debug!(
            tasks = doc.tasks.len(),
            goals = doc.goals.len(),
            points = doc.points,
            "document loaded"
        );
        Self {
            doc,
            saves: SaveQueue::spawn(store),
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn forest(&self) -> Vec<TreeNode<'_>> {
        graph::build_forest(&self.doc.tasks)
    }

    /// Next completable milestone per goal, in document order.
    pub fn milestone_eligibility(&self) -> Vec<(&str, Option<&str>)> {
        self.doc
            .goals
            .iter()
            .map(|g| (g.id.as_str(), rules::next_actionable_milestone(g)))
            .collect()
    }

    pub fn dispatch(&mut self, intent: Intent) -> Result<Outcome, TasquestError> {
        self.dispatch_at(intent, Utc::now())
    }

    /// Apply `intent` as of `now`. On error the document is untouched and nothing is saved.
    pub fn dispatch_at(
        &mut self,
        intent: Intent,
        now: DateTime<Utc>,
    ) -> Result<Outcome, TasquestError> {
        let outcome = self.apply(intent, now)?;
        tracing::debug!(id = %outcome.id, points = outcome.points, "intent applied");
        self.saves.enqueue(self.doc.clone());
        Ok(outcome)
    }

    /// Flush pending saves.
    pub fn close(self) {
        self.saves.close();
    }

    fn apply(&mut self, intent: Intent, now: DateTime<Utc>) -> Result<Outcome, TasquestError> {
        match intent {
            Intent::CreateTask {
                title,
                parent_id,
                deadline,
            } => self.create_task(&title, parent_id.as_deref(), deadline),
            Intent::EditTask { id, edit } => self.edit_task(&id, edit),
            Intent::DeleteTask { id } => self.delete_task(&id),
            Intent::ToggleTask { id } => self.toggle_task(&id, now),
            Intent::CreateGoal { title } => self.create_goal(&title, now),
            Intent::EditGoal { id, title } => self.edit_goal(&id, &title),
            Intent::AddMilestone { goal_id, title } => self.add_milestone(&goal_id, &title),
            Intent::EditMilestone {
                goal_id,
                milestone_id,
                title,
            } => self.edit_milestone(&goal_id, &milestone_id, &title),
            Intent::ToggleMilestone {
                goal_id,
                milestone_id,
            } => self.toggle_milestone(&goal_id, &milestone_id, now),
            Intent::ToggleGoal { id } => self.toggle_goal(&id),
        }
    }

    fn outcome(&self, id: &str, title: &str) -> Outcome {
        Outcome {
            id: id.to_string(),
            title: title.to_string(),
            transition: None,
            auto_closed: false,
            points: self.doc.points,
            events: Vec::new(),
        }
    }

    fn record(&mut self, mut outcome: Outcome, transition: Transition) -> Outcome {
        self.doc.points = scoring::apply(self.doc.points, transition);
        outcome.points = self.doc.points;
        outcome.transition = Some(transition);
        if transition.is_completion() {
            outcome.events.push(Event::Celebrate {
                transition,
                title: outcome.title.clone(),
            });
        }
        outcome
    }

    fn fresh_id(&self) -> String {
        new_id(|candidate| self.doc.id_taken(candidate))
    }

    fn create_task(
        &mut self,
        title: &str,
        parent_ref: Option<&str>,
        deadline: Option<NaiveDateTime>,
    ) -> Result<Outcome, TasquestError> {
        require_title(title)?;
        let parent_id = match parent_ref.filter(|p| !p.is_empty()) {
            Some(r) => Some(self.doc.tasks[self.doc.resolve_task(r)?].id.clone()),
            None => None,
        };
        let task = Task::new(self.fresh_id(), title, parent_id, deadline);
        let outcome = self.outcome(&task.id, &task.title);
        self.doc.tasks.insert(0, task);
        Ok(outcome)
    }

    fn edit_task(&mut self, reference: &str, edit: TaskEdit) -> Result<Outcome, TasquestError> {
        let idx = self.doc.resolve_task(reference)?;
        if let Some(title) = &edit.title {
            require_title(title)?;
        }
        let parent_id = match edit.parent_id {
            Some(Some(r)) if !r.is_empty() => {
                let pid = self.doc.tasks[self.doc.resolve_task(&r)?].id.clone();
                graph::check_parent(&self.doc.tasks[idx].id, &pid, &self.doc.tasks)?;
                Some(Some(pid))
            }
            Some(_) => Some(None),
            None => None,
        };

        let task = &mut self.doc.tasks[idx];
        if let Some(title) = edit.title {
            task.title = title.trim().to_string();
        }
        if let Some(deadline) = edit.deadline {
            task.deadline = deadline;
        }
        if let Some(parent_id) = parent_id {
            task.parent_id = parent_id;
        }
        let (id, title) = (task.id.clone(), task.title.clone());
        Ok(self.outcome(&id, &title))
    }

    /// Removes only the task itself; its direct children are promoted to roots.
    fn delete_task(&mut self, reference: &str) -> Result<Outcome, TasquestError> {
        let idx = self.doc.resolve_task(reference)?;
        let removed = self.doc.tasks.remove(idx);
        for task in &mut self.doc.tasks {
            if task.parent_id.as_deref() == Some(removed.id.as_str()) {
                task.parent_id = None;
            }
        }
        Ok(self.outcome(&removed.id, &removed.title))
    }

    fn toggle_task(
        &mut self,
        reference: &str,
        now: DateTime<Utc>,
    ) -> Result<Outcome, TasquestError> {
        let idx = self.doc.resolve_task(reference)?;
        let toggle = {
            let index = graph::children_index(&self.doc.tasks);
            rules::toggle_task_completion(&self.doc.tasks[idx], &index, now)?
        };
        toggle.apply_to(&mut self.doc.tasks[idx]);
        let task = &self.doc.tasks[idx];
        let outcome = self.outcome(&task.id, &task.title);
        Ok(self.record(outcome, toggle.transition()))
    }

    fn create_goal(&mut self, title: &str, now: DateTime<Utc>) -> Result<Outcome, TasquestError> {
        require_title(title)?;
        let goal = Goal::new(self.fresh_id(), title, now);
        let outcome = self.outcome(&goal.id, &goal.title);
        self.doc.goals.insert(0, goal);
        Ok(outcome)
    }

    fn edit_goal(&mut self, reference: &str, title: &str) -> Result<Outcome, TasquestError> {
        let idx = self.doc.resolve_goal(reference)?;
        require_title(title)?;
        let goal = &mut self.doc.goals[idx];
        goal.title = title.trim().to_string();
        let id = goal.id.clone();
        Ok(self.outcome(&id, title.trim()))
    }

    fn add_milestone(&mut self, goal_ref: &str, title: &str) -> Result<Outcome, TasquestError> {
        let idx = self.doc.resolve_goal(goal_ref)?;
        require_title(title)?;
        let milestone = Milestone::new(self.fresh_id(), title);
        let outcome = self.outcome(&milestone.id, &milestone.title);
        self.doc.goals[idx].milestones.push(milestone);
        Ok(outcome)
    }

    fn edit_milestone(
        &mut self,
        goal_ref: &str,
        milestone_ref: &str,
        title: &str,
    ) -> Result<Outcome, TasquestError> {
        let gi = self.doc.resolve_goal(goal_ref)?;
        let mi = self.doc.goals[gi].resolve_milestone(milestone_ref)?;
        require_title(title)?;
        let milestone = &mut self.doc.goals[gi].milestones[mi];
        milestone.title = title.trim().to_string();
        let id = milestone.id.clone();
        Ok(self.outcome(&id, title.trim()))
    }

    fn toggle_milestone(
        &mut self,
        goal_ref: &str,
        milestone_ref: &str,
        now: DateTime<Utc>,
    ) -> Result<Outcome, TasquestError> {
        let gi = self.doc.resolve_goal(goal_ref)?;
        let goal = &self.doc.goals[gi];
        let mi = goal.resolve_milestone(milestone_ref)?;
        let milestone = &goal.milestones[mi];
        let mut outcome = self.outcome(&milestone.id, &milestone.title);

        let toggle = rules::toggle_milestone_completion(goal, &milestone.id, now)?;
        self.doc.goals[gi] = toggle.goal;
        outcome.auto_closed = toggle.auto_closed;
        Ok(self.record(outcome, toggle.transition))
    }

    fn toggle_goal(&mut self, reference: &str) -> Result<Outcome, TasquestError> {
        let idx = self.doc.resolve_goal(reference)?;
        let (updated, transition) = rules::toggle_goal_completion(&self.doc.goals[idx])?;
        let outcome = self.outcome(&updated.id, &updated.title);
        self.doc.goals[idx] = updated;
        Ok(self.record(outcome, transition))
    }
}

fn require_title(title: &str) -> Result<(), TasquestError> {
    if is_valid_title(title) {
        Ok(())
    } else {
        Err(TasquestError::empty_title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::store::MemoryStore;

    fn app() -> (App, MemoryStore) {
        let store = MemoryStore::new();
        (App::open(Box::new(store.clone())), store)
    }

    fn add_task(app: &mut App, title: &str, parent: Option<&str>) -> String {
        app.dispatch(Intent::CreateTask {
            title: title.into(),
            parent_id: parent.map(String::from),
            deadline: None,
        })
        .unwrap()
        .id
    }

    fn toggle(app: &mut App, id: &str) -> Result<Outcome, TasquestError> {
        app.dispatch(Intent::ToggleTask { id: id.into() })
    }

    #[test]
    fn new_tasks_are_prepended() {
        let (mut app, _) = app();
        let a = add_task(&mut app, "first", None);
        let b = add_task(&mut app, "second", None);
        let ids: Vec<&str> = app.document().tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, [b.as_str(), a.as_str()]);
    }

    #[test]
    fn empty_title_is_rejected_without_change() {
        let (mut app, store) = app();
        let err = app
            .dispatch(Intent::CreateTask {
                title: "   ".into(),
                parent_id: None,
                deadline: None,
            })
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(app.document().tasks.is_empty());
        app.close();
        assert_eq!(store.saves(), 0);
    }

    #[test]
    fn open_picks_up_stored_document() {
        let mut doc = Document::default();
        doc.tasks.push(Task::new("abc123".into(), "Stored", None, None));
        doc.points = 7;
        let mut app = App::open(Box::new(MemoryStore::with_document(doc)));
        assert_eq!(app.document().points, 7);
        let out = toggle(&mut app, "abc").unwrap();
        assert_eq!(out.id, "abc123");
        assert_eq!(out.points, 8);
    }

    #[test]
    fn unknown_parent_is_rejected() {
        let (mut app, _) = app();
        let err = app
            .dispatch(Intent::CreateTask {
                title: "x".into(),
                parent_id: Some("nothere".into()),
                deadline: None,
            })
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::TaskNotFound);
    }

    #[test]
    fn chain_completion_and_points() {
        let (mut app, store) = app();
        let a = add_task(&mut app, "A", None);
        let b = add_task(&mut app, "B", Some(&a));
        let c = add_task(&mut app, "C", Some(&b));

        let err = toggle(&mut app, &a).unwrap_err();
        assert_eq!(err.code, ErrorCode::BlockedByIncompleteDescendants);
        assert_eq!(app.document().points, 0);

        let out = toggle(&mut app, &c).unwrap();
        assert_eq!(out.points, 1);
        assert_eq!(
            out.events,
            vec![Event::Celebrate {
                transition: Transition::TaskCompleted,
                title: "C".into()
            }]
        );
        toggle(&mut app, &b).unwrap();
        let out = toggle(&mut app, &a).unwrap();
        assert_eq!(out.points, 3);

        let out = toggle(&mut app, &a).unwrap();
        assert_eq!(out.transition, Some(Transition::TaskReopened));
        assert_eq!(out.points, 2);
        assert!(out.events.is_empty());

        app.close();
        assert_eq!(store.snapshot().unwrap().points, 2);
    }

    #[test]
    fn edit_rejects_cycles() {
        let (mut app, _) = app();
        let a = add_task(&mut app, "A", None);
        let b = add_task(&mut app, "B", Some(&a));
        let err = app
            .dispatch(Intent::EditTask {
                id: a.clone(),
                edit: TaskEdit {
                    parent_id: Some(Some(b.clone())),
                    ..Default::default()
                },
            })
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CycleDetected);
        assert_eq!(app.document().task(&a).unwrap().parent_id, None);

        app.dispatch(Intent::EditTask {
            id: b.clone(),
            edit: TaskEdit {
                title: Some(" B2 ".into()),
                parent_id: Some(None),
                ..Default::default()
            },
        })
        .unwrap();
        let task = app.document().task(&b).unwrap();
        assert_eq!(task.title, "B2");
        assert!(task.is_root());
    }

    #[test]
    fn delete_promotes_children() {
        let (mut app, _) = app();
        let a = add_task(&mut app, "A", None);
        let b = add_task(&mut app, "B", Some(&a));
        let c = add_task(&mut app, "C", Some(&b));
        app.dispatch(Intent::DeleteTask { id: a.clone() }).unwrap();
        assert!(app.document().task(&a).is_none());
        assert!(app.document().task(&b).unwrap().is_root());
        assert_eq!(app.document().task(&c).unwrap().parent_id.as_deref(), Some(b.as_str()));
        assert_eq!(app.forest().len(), 1);
    }

    #[test]
    fn goal_flow_awards_points() {
        let (mut app, _) = app();
        let g = app
            .dispatch(Intent::CreateGoal {
                title: "TOEIC 900".into(),
            })
            .unwrap()
            .id;
        let mut ms = Vec::new();
        for title in ["800", "700", "600"] {
            let out = app
                .dispatch(Intent::AddMilestone {
                    goal_id: g.clone(),
                    title: title.into(),
                })
                .unwrap();
            ms.push(out.id);
        }
        assert_eq!(app.milestone_eligibility(), vec![(g.as_str(), Some(ms[2].as_str()))]);

        let err = app
            .dispatch(Intent::ToggleMilestone {
                goal_id: g.clone(),
                milestone_id: ms[0].clone(),
            })
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::OutOfSequence);
        assert!(err.message.contains("600"));

        let err = app.dispatch(Intent::ToggleGoal { id: g.clone() }).unwrap_err();
        assert_eq!(err.code, ErrorCode::BlockedByIncompleteMilestones);

        for m in ms.iter().rev() {
            app.dispatch(Intent::ToggleMilestone {
                goal_id: g.clone(),
                milestone_id: m.clone(),
            })
            .unwrap();
        }
        let goal = app.document().goal(&g).unwrap();
        assert!(goal.completed);
        assert_eq!(app.document().points, 3);

        // Manual reopen then close awards the goal bonus.
        app.dispatch(Intent::ToggleGoal { id: g.clone() }).unwrap();
        assert_eq!(app.document().points, 3);
        let out = app.dispatch(Intent::ToggleGoal { id: g.clone() }).unwrap();
        assert_eq!(out.points, 5);
        assert_eq!(out.transition, Some(Transition::GoalCompleted));

        // Reopening a milestone keeps points and leaves the goal closed.
        let out = app
            .dispatch(Intent::ToggleMilestone {
                goal_id: g.clone(),
                milestone_id: ms[0].clone(),
            })
            .unwrap();
        assert_eq!(out.points, 5);
        assert!(app.document().goal(&g).unwrap().completed);
    }

    #[test]
    fn rename_goal_and_milestone() {
        let (mut app, _) = app();
        let g = app.dispatch(Intent::CreateGoal { title: "old".into() }).unwrap().id;
        let m = app
            .dispatch(Intent::AddMilestone {
                goal_id: g.clone(),
                title: "step".into(),
            })
            .unwrap()
            .id;
        app.dispatch(Intent::EditGoal {
            id: g.clone(),
            title: "new".into(),
        })
        .unwrap();
        app.dispatch(Intent::EditMilestone {
            goal_id: g.clone(),
            milestone_id: m.clone(),
            title: "renamed".into(),
        })
        .unwrap();
        let err = app
            .dispatch(Intent::EditGoal {
                id: g.clone(),
                title: "".into(),
            })
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        let goal = app.document().goal(&g).unwrap();
        assert_eq!(goal.title, "new");
        assert_eq!(goal.milestones[0].title, "renamed");
    }

    #[test]
    fn open_restores_saved_document() {
        let store = MemoryStore::new();
        let mut app = App::open(Box::new(store.clone()));
        add_task(&mut app, "kept", None);
        app.close();
        let reopened = App::open(Box::new(store));
        assert_eq!(reopened.document().tasks[0].title, "kept");
    }
}
