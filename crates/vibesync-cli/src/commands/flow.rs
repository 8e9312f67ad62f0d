use chrono::Local;
use clap::Subcommand;
use vibesync_core::flow::{flow_chart, ChartView, FlowChart};
use vibesync_core::storage::Database;

#[derive(Subcommand)]
pub enum FlowAction {
    /// Today's flow, bucketed into 4-hour blocks
    Today {
        /// Print the chart as JSON instead of bars
        #[arg(long)]
        json: bool,
    },
    /// This week's flow by day, ending on today
    Week {
        /// Print the chart as JSON instead of bars
        #[arg(long)]
        json: bool,
    },
    /// All-time totals
    Total,
}

pub fn run(action: FlowAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        FlowAction::Today { json } => {
            let history = db.flow_history()?;
            let chart = flow_chart(&history, Local::now(), ChartView::Today);
            render(&chart, json)?;
        }
        FlowAction::Week { json } => {
            let history = db.flow_history()?;
            let chart = flow_chart(&history, Local::now(), ChartView::Week);
            render(&chart, json)?;
        }
        FlowAction::Total => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "total_score": db.total_flow_score()?,
                    "completed_cycles": db.completed_cycles()?,
                }))?
            );
        }
    }
    Ok(())
}

fn render(chart: &FlowChart, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(chart)?);
        return Ok(());
    }
    if chart.is_empty() {
        println!("No activity to show for this period.");
    } else {
        let max = chart.bars.iter().map(|b| b.value).max().unwrap_or(0).max(25);
        for bar in &chart.bars {
            // Scale to at most 40 columns.
            let width = (bar.value * 40 / max) as usize;
            println!("{:>4}  {:<40} {}", bar.label, "#".repeat(width), bar.value);
        }
    }
    println!("total: {}", chart.total_score);
    Ok(())
}
