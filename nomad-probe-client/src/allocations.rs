//! Allocation-related API endpoints

use crate::NomadClient;
use crate::error::Result;
use nomad_probe_core::domain::allocation::Allocation;

impl NomadClient {
    /// List allocations across all jobs
    ///
    /// # Arguments
    /// * `resources` - Ask the agent to include resource details in each stub
    ///
    /// # Returns
    /// Allocation stubs in the order the agent returned them
    pub async fn list_allocations(&self, resources: bool) -> Result<Vec<Allocation>> {
        let url = self.endpoint(&["v1", "allocations"]);
        let mut request = self.scoped(self.client.get(url));
        if resources {
            request = request.query(&[("resources", "true")]);
        }

        let response = request.send().await?;

        self.handle_response(response).await
    }
}
