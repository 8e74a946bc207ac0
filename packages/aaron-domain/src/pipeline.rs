use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

/// Progress shown for the stage currently in flight. A fixed placeholder, not a measurement.
pub const ACTIVE_STAGE_PROGRESS: u8 = 65;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
	#[default]
	Planning,
	Doing,
	Testing,
	Done,
}
impl Stage {
	pub const ALL: [Stage; 4] = [Stage::Planning, Stage::Doing, Stage::Testing, Stage::Done];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageState {
	Pending,
	Active,
	Completed,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageProgress {
	pub name: Stage,
	pub status: StageState,
	pub progress: u8,
}
impl StageProgress {
	/// Stages before `current` are complete, `current` is active, the rest are pending.
	pub fn derive(current: Stage) -> Vec<StageProgress> {
		Stage::ALL
			.into_iter()
			.map(|name| {
				let (status, progress) = match name.cmp(&current) {
					std::cmp::Ordering::Less => (StageState::Completed, 100),
					std::cmp::Ordering::Equal => (StageState::Active, ACTIVE_STAGE_PROGRESS),
					std::cmp::Ordering::Greater => (StageState::Pending, 0),
				};

				StageProgress { name, status, progress }
			})
			.collect()
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusPipeline {
	pub id: String,
	pub current_stage: Stage,
	pub stages: Vec<StageProgress>,
	pub task_id: Option<String>,
	#[serde(with = "crate::time_serde")]
	pub updated_at: OffsetDateTime,
	#[serde(default)]
	pub metadata: Option<Value>,
}
impl StatusPipeline {
	pub fn new(id: String, now: OffsetDateTime) -> Self {
		let current_stage = Stage::default();

		Self {
			id,
			current_stage,
			stages: StageProgress::derive(current_stage),
			task_id: None,
			updated_at: now,
			metadata: None,
		}
	}

	pub fn apply(&mut self, patch: PipelinePatch, now: OffsetDateTime) {
		if let Some(stage) = patch.current_stage {
			self.current_stage = stage;
		}
		if let Some(task_id) = patch.task_id {
			self.task_id = Some(task_id);
		}
		if let Some(metadata) = patch.metadata {
			self.metadata = Some(metadata);
		}

		self.stages = StageProgress::derive(self.current_stage);
		self.updated_at = now;
	}
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelinePatch {
	#[serde(default)]
	pub current_stage: Option<Stage>,
	#[serde(default)]
	pub task_id: Option<String>,
	#[serde(default)]
	pub metadata: Option<Value>,
}
