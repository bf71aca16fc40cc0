#[cfg(test)]
#[path = "report_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;

use super::HttpApi;

impl HttpApi {
    /// Fetches the inventory report PDF for a user. The caller decides where
    /// the bytes land on disk.
    pub async fn generate_report(&self, user_id: i64) -> Result<Vec<u8>> {
        let res = self
            .get(&format!("/api/generate_report?user_id={user_id}"))
            .send()
            .await?;
        if !res.status().is_success() {
            bail!("report request returned status {}", res.status().as_u16());
        }

        return Ok(res.bytes().await?.to_vec());
    }
}
