use std::path::PathBuf;

use clap::Subcommand;
use learnpath_core::{QuizResult, Roadmap, RoadmapItem};
use serde::Serialize;

#[derive(Subcommand)]
pub enum RoadmapAction {
    /// Print the roadmap, personalized by a quiz result if given
    Show {
        /// Quiz result JSON written by `quiz take --json` or `quiz score`
        #[arg(long)]
        result: Option<PathBuf>,
        /// Roadmap JSON to use instead of the built-in learning path
        #[arg(long)]
        roadmap: Option<PathBuf>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RoadmapView<'a> {
    overall_progress: u8,
    current: Option<&'a RoadmapItem>,
    items: &'a [RoadmapItem],
}

pub fn run(action: RoadmapAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        RoadmapAction::Show { result, roadmap } => {
            let base = match roadmap {
                Some(path) => serde_json::from_str::<Roadmap>(&std::fs::read_to_string(path)?)?,
                None => Roadmap::sample(),
            };
            let roadmap = match result {
                Some(path) => base.personalize(&QuizResult::load(&path)?),
                None => base,
            };

            let view = RoadmapView {
                overall_progress: roadmap.overall_progress(),
                current: roadmap.current_item(),
                items: &roadmap.items,
            };
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
    }
    Ok(())
}
