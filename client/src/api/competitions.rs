use log::{debug, info};
use reqwest::Method;
use sansi_shared::{
    Competition, CompetitionDraft, CompetitionEnvelope, CompetitionFilter, CompetitionList,
    CompetitionPayload,
};

use crate::api::utils::{ensure_ok, send_acknowledged, send_empty, send_json};
use crate::api::ApiClient;
use crate::error::{ClientError, Result};

impl ApiClient {
    /// `GET /api/competitions`, filtered server side and again locally.
    pub async fn list_competitions(&self, filter: &CompetitionFilter) -> Result<Vec<Competition>> {
        let req = self
            .authenticated_get(&["api", "competitions"])?
            .query(&filter.query_pairs());
        let list: CompetitionList = send_json(req).await?;

        let competitions = list
            .into_vec()
            .into_iter()
            .map(Competition::try_from)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let total = competitions.len();
        let kept: Vec<_> = competitions
            .into_iter()
            .filter(|c| filter.matches(c))
            .collect();
        debug!("Listed {} competitions, {} after local filter", total, kept.len());
        Ok(kept)
    }

    /// `GET /api/competitions/{id}`
    pub async fn get_competition(&self, id: &str) -> Result<Competition> {
        let req = self.authenticated_get(&["api", "competitions", id])?;
        let body: serde_json::Value = send_json(req).await?;
        ensure_ok(&body)?;
        let envelope: CompetitionEnvelope =
            serde_json::from_value(body).map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(Competition::try_from(envelope.into_inner())?)
    }

    /// `POST /api/competitions` after the form checks pass.
    pub async fn create_competition(&self, draft: &CompetitionDraft) -> Result<()> {
        let payload = CompetitionPayload::try_from(draft)?;
        let req = self
            .token_request(Method::POST, &["api", "competitions"])?
            .json(&payload);
        send_empty(req).await?;
        info!("Created competition {}", payload.name);
        Ok(())
    }

    /// `PUT /api/competitions/{id}` after the form checks pass.
    ///
    /// Nothing is sent when the draft, its stages or its phases are invalid.
    pub async fn update_competition(&self, id: &str, draft: &CompetitionDraft) -> Result<()> {
        let payload = CompetitionPayload::try_from(draft)?;
        let req = self
            .token_request(Method::PUT, &["api", "competitions", id])?
            .json(&payload);
        send_empty(req).await?;
        info!("Updated competition {}", id);
        Ok(())
    }

    /// `DELETE /api/competitions/{id}`
    pub async fn delete_competition(&self, id: &str) -> Result<()> {
        let req = self.token_request(Method::DELETE, &["api", "competitions", id])?;
        send_empty(req).await?;
        info!("Deleted competition {}", id);
        Ok(())
    }

    /// `POST /api/competitions/{id}/inscribirse`
    pub async fn enroll(&self, id: &str) -> Result<()> {
        let req = self.token_request(Method::POST, &["api", "competitions", id, "inscribirse"])?;
        send_acknowledged(req).await?;
        info!("Enrolled in competition {}", id);
        Ok(())
    }

    /// `DELETE /api/competitions/{id}/desinscribirse`
    pub async fn unenroll(&self, id: &str) -> Result<()> {
        let req =
            self.token_request(Method::DELETE, &["api", "competitions", id, "desinscribirse"])?;
        send_acknowledged(req).await?;
        info!("Withdrew from competition {}", id);
        Ok(())
    }
}
