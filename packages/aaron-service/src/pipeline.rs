use aaron_domain::{PipelinePatch, ServerEvent, StatusPipeline};

use crate::AaronService;

impl AaronService {
	pub async fn status_pipeline(&self) -> StatusPipeline {
		self.storage.read().await.status_pipeline().clone()
	}

	pub async fn update_status_pipeline(&self, patch: PipelinePatch) -> StatusPipeline {
		let pipeline = self.storage.write().await.update_status_pipeline(patch, crate::now());

		self.events.publish(ServerEvent::PipelineUpdated { pipeline: pipeline.clone() });

		pipeline
	}
}
