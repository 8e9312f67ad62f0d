use clap::Subcommand;
use vibesync_core::storage::Database;
use vibesync_core::{TaskList, TaskTag};

const TASKS_KEY: &str = "tasks";

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task
    Add {
        text: String,
        /// Category tag (Study, Work, Gym, Deep Work, Personal)
        #[arg(long, default_value = "Personal")]
        tag: TaskTag,
    },
    /// List tasks
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Toggle a task's completion by its list position
    Done { position: usize },
    /// Replace a task's text (and optionally tag) by its list position
    Edit {
        position: usize,
        text: String,
        #[arg(long)]
        tag: Option<TaskTag>,
    },
    /// Remove a task by its list position
    Remove { position: usize },
}

fn load_tasks(db: &Database) -> TaskList {
    if let Ok(Some(json)) = db.kv_get(TASKS_KEY) {
        if let Ok(tasks) = serde_json::from_str(&json) {
            return tasks;
        }
    }
    TaskList::default()
}

fn save_tasks(db: &Database, tasks: &TaskList) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(tasks)?;
    db.kv_set(TASKS_KEY, &json)?;
    Ok(())
}

fn id_at(tasks: &TaskList, position: usize) -> Result<uuid::Uuid, Box<dyn std::error::Error>> {
    tasks
        .by_position(position)
        .map(|t| t.id)
        .ok_or_else(|| format!("no task at position {position}").into())
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut tasks = load_tasks(&db);

    match action {
        TaskAction::Add { text, tag } => {
            match tasks.add(&text, tag) {
                Some(task) => println!("added: {} [{}]", task.text, task.tag),
                None => return Err("task text is empty".into()),
            }
            save_tasks(&db, &tasks)?;
        }
        TaskAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(tasks.tasks())?);
            } else if tasks.is_empty() {
                println!("no tasks");
            } else {
                for (i, task) in tasks.tasks().iter().enumerate() {
                    let mark = if task.completed { "x" } else { " " };
                    println!("{:>3}. [{mark}] {} [{}]", i + 1, task.text, task.tag);
                }
                println!(
                    "{}/{} completed",
                    tasks.completed_count(),
                    tasks.len()
                );
            }
        }
        TaskAction::Done { position } => {
            let id = id_at(&tasks, position)?;
            tasks.toggle(id);
            save_tasks(&db, &tasks)?;
            println!("toggled task {position}");
        }
        TaskAction::Edit {
            position,
            text,
            tag,
        } => {
            let id = id_at(&tasks, position)?;
            let tag = tag
                .or_else(|| tasks.by_position(position).map(|t| t.tag))
                .unwrap_or(TaskTag::Personal);
            if !tasks.edit(id, &text, tag) {
                return Err("task text is empty".into());
            }
            save_tasks(&db, &tasks)?;
            println!("edited task {position}");
        }
        TaskAction::Remove { position } => {
            let id = id_at(&tasks, position)?;
            tasks.remove(id);
            save_tasks(&db, &tasks)?;
            println!("removed task {position}");
        }
    }
    Ok(())
}
