use super::TicketRepository;
use crate::core::{Ticket, TicketId};
use crate::error::{HelpdeskError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

/// JSON file backed ticket storage
///
/// The whole collection lives in one pretty-printed JSON array. It is read
/// once at open and written through on every save; readers are served from
/// the in-memory copy.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    tickets: RwLock<Vec<Ticket>>,
}

impl FileStorage {
    /// Open the data file, starting empty when it does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let tickets = Self::read_file(&path)?;
        tracing::debug!("Loaded {} tickets from {}", tickets.len(), path.display());
        Ok(Self {
            path,
            tickets: RwLock::new(tickets),
        })
    }

    /// Location of the data file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(path: &Path) -> Result<Vec<Ticket>> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            HelpdeskError::custom(format!(
                "Failed to parse ticket file {}: {e}",
                path.display()
            ))
        })
    }

    /// Write via a sibling temp file so a crash never leaves a torn file
    fn write_file(&self, tickets: &[Ticket]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(tickets)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!("Saved {} tickets to {}", tickets.len(), self.path.display());
        Ok(())
    }
}

impl TicketRepository for FileStorage {
    fn save(&self, ticket: &Ticket) -> Result<()> {
        let mut tickets = self.tickets.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = tickets.clone();
        match next.iter_mut().find(|t| t.id == ticket.id) {
            Some(existing) => *existing = ticket.clone(),
            None => next.push(ticket.clone()),
        }
        // Only publish the change once it is on disk
        self.write_file(&next)?;
        *tickets = next;
        Ok(())
    }

    fn load(&self, id: &TicketId) -> Result<Ticket> {
        let tickets = self.tickets.read().unwrap_or_else(PoisonError::into_inner);
        tickets
            .iter()
            .find(|t| &t.id == id)
            .cloned()
            .ok_or_else(|| HelpdeskError::TicketNotFound { id: id.to_string() })
    }

    fn load_all(&self) -> Result<Vec<Ticket>> {
        Ok(self
            .tickets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Status;
    use crate::test_utils::create_test_ticket;
    use tempfile::TempDir;

    #[test]
    fn test_reopen_sees_saved_tickets() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("tickets.json");

        let ticket = create_test_ticket("Alice", "iPhone 12");
        {
            let storage = FileStorage::open(&path).unwrap();
            storage.save(&ticket).unwrap();
        }

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.load(&ticket.id).unwrap(), ticket);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_reads_legacy_open_status() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tickets.json");
        std::fs::write(
            &path,
            r#"[{
                "id": "5b1e8a8e-3f0e-4a7a-9a43-0f6f1f3f9d11",
                "name": "Legacy",
                "phone": "555-000-1111",
                "email": "legacy@example.com",
                "deviceName": "Desktop PC",
                "description": "",
                "status": "open",
                "priority": "medium",
                "assignedTo": null,
                "notes": [],
                "createdAt": "2024-05-01T10:00:00.000Z",
                "updatedAt": "2024-05-01T10:00:00.000Z"
            }]"#,
        )
        .unwrap();

        let storage = FileStorage::open(&path).unwrap();
        let all = storage.load_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].status, Status::New);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tickets.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(FileStorage::open(&path).is_err());
    }
}
