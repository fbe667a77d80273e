//! Job node implementation

use super::types::NodeId;
use serde::{Deserialize, Serialize};

/// A vertex in the job graph: one job title with its classification metadata.
///
/// Nodes carry:
/// - A unique ID
/// - The job title and its industry/sector classification
/// - Optional descriptive text produced by the classification workflow
/// - A creation timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobNode {
    /// Unique identifier for this node
    pub id: NodeId,

    /// Job title (e.g., "Software Engineer")
    pub title: String,

    /// Industry classification (e.g., "Technology")
    pub industry: String,

    /// Sector within the industry (e.g., "Software")
    pub sector: String,

    /// Free-text role description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Free-text skill summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<String>,

    /// Free-text responsibilities summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsibilities: Option<String>,

    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,
}

impl JobNode {
    /// Create a new job node with the required classification fields
    pub fn new(
        id: NodeId,
        title: impl Into<String>,
        industry: impl Into<String>,
        sector: impl Into<String>,
    ) -> Self {
        JobNode {
            id,
            title: title.into(),
            industry: industry.into(),
            sector: sector.into(),
            description: None,
            skills: None,
            responsibilities: None,
            created_at: Self::current_timestamp(),
        }
    }

    /// Attach the optional descriptive text fields
    pub fn with_details(
        mut self,
        description: Option<String>,
        skills: Option<String>,
        responsibilities: Option<String>,
    ) -> Self {
        self.description = description;
        self.skills = skills;
        self.responsibilities = responsibilities;
        self
    }

    fn current_timestamp() -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

impl PartialEq for JobNode {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for JobNode {}

impl std::hash::Hash for JobNode {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_node() {
        let node = JobNode::new(NodeId::new(1), "Software Engineer", "Technology", "Software");
        assert_eq!(node.id, NodeId::new(1));
        assert_eq!(node.title, "Software Engineer");
        assert_eq!(node.industry, "Technology");
        assert_eq!(node.sector, "Software");
        assert!(node.description.is_none());
        assert!(node.created_at > 0);
    }

    #[test]
    fn test_with_details() {
        let node = JobNode::new(NodeId::new(2), "Data Scientist", "Technology", "Analytics")
            .with_details(Some("Builds models".to_string()), Some("Python, SQL".to_string()), None);

        assert_eq!(node.description.as_deref(), Some("Builds models"));
        assert_eq!(node.skills.as_deref(), Some("Python, SQL"));
        assert!(node.responsibilities.is_none());
    }

    #[test]
    fn test_node_equality_is_by_id() {
        let node1 = JobNode::new(NodeId::new(7), "Engineer", "Technology", "Software");
        let node2 = JobNode::new(NodeId::new(7), "Designer", "Design", "Software");
        let node3 = JobNode::new(NodeId::new(8), "Engineer", "Technology", "Software");

        assert_eq!(node1, node2);
        assert_ne!(node1, node3);
    }

    #[test]
    fn test_optional_fields_omitted_from_json() {
        let node = JobNode::new(NodeId::new(3), "Recruiter", "Human Resources", "Services");
        let json = serde_json::to_value(&node).unwrap();
        assert!(json.get("description").is_none());
        assert_eq!(json["title"], "Recruiter");
    }
}
