//! Client repository for binary record storage
//!
//! Manages loading and saving clients to clients.dat. Each mutating call
//! loads the full set, changes it in memory and saves the full set back.

use std::cmp::Ordering;
use std::path::PathBuf;

use tracing::info;

use crate::error::{WattbookError, WattbookResult};
use crate::models::{Client, ClientAddress, ClientId, ClientName, ClientPhone, FixedText};

use super::record_store::RecordStore;

/// A client record before and after an in-place change
#[derive(Debug, Clone)]
pub struct UpdatedClient {
    pub before: Client,
    pub after: Client,
}

/// Repository for client persistence
#[derive(Debug)]
pub struct ClientRepository {
    store: RecordStore<Client>,
}

impl ClientRepository {
    /// Create a new client repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            store: RecordStore::new(path),
        }
    }

    pub(crate) fn store(&self) -> &RecordStore<Client> {
        &self.store
    }

    /// Every client, in stored order
    pub fn list(&self) -> WattbookResult<Vec<Client>> {
        self.store.load()
    }

    /// Count clients
    pub fn count(&self) -> WattbookResult<usize> {
        Ok(self.store.load()?.len())
    }

    /// The id the next added client will receive
    pub fn next_id(records: &[Client]) -> WattbookResult<ClientId> {
        ClientId::next_after(records.iter().map(|c| c.id))
            .ok_or_else(|| WattbookError::Storage("Client id space exhausted".into()))
    }

    /// Add a client and persist the full set
    pub fn add(
        &self,
        name: &str,
        address: &str,
        phone: &str,
        consumption: f64,
        rate: f64,
        last_bill: f64,
    ) -> WattbookResult<Client> {
        let name: ClientName = bounded("Client name", name)?;
        let address: ClientAddress = bounded("Client address", address)?;
        let phone: ClientPhone = bounded("Client phone", phone)?;

        // Validate before loading so a bad request never touches the file
        let mut client = Client::new(
            ClientId::new(0),
            name,
            address,
            phone,
            consumption,
            rate,
            last_bill,
        );
        client
            .validate()
            .map_err(|e| WattbookError::Validation(e.to_string()))?;

        let mut clients = self.store.load()?;
        client.id = Self::next_id(&clients)?;
        clients.push(client.clone());
        self.store.save(&clients)?;

        info!(client_id = %client.id, "client added");
        Ok(client)
    }

    /// Replace a client's consumption and rate
    pub fn update(
        &self,
        id: ClientId,
        consumption: f64,
        rate: f64,
    ) -> WattbookResult<UpdatedClient> {
        Client::validate_usage(consumption, rate)
            .map_err(|e| WattbookError::Validation(e.to_string()))?;

        let mut clients = self.store.load()?;
        let client = clients
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| WattbookError::client_not_found(id.to_string()))?;
        let before = client.clone();
        client.set_usage(consumption, rate);
        let after = client.clone();

        self.store.save(&clients)?;

        info!(client_id = %id, "client updated");
        Ok(UpdatedClient { before, after })
    }

    /// Remove a client, shifting later records down; returns the removed record
    ///
    /// Bills that reference the client are left as they are.
    pub fn delete(&self, id: ClientId) -> WattbookResult<Client> {
        let mut clients = self.store.load()?;
        let index = clients
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| WattbookError::client_not_found(id.to_string()))?;

        let removed = clients.remove(index);
        self.store.save(&clients)?;

        info!(client_id = %id, "client deleted");
        Ok(removed)
    }

    /// Get a client by ID
    pub fn find_by_id(&self, id: ClientId) -> WattbookResult<Option<Client>> {
        Ok(self.store.load()?.into_iter().find(|c| c.id == id))
    }

    /// Get the first client whose name matches exactly (case-sensitive)
    pub fn find_by_name(&self, name: &str) -> WattbookResult<Option<Client>> {
        Ok(self
            .store
            .load()?
            .into_iter()
            .find(|c| c.name.as_str() == name))
    }

    /// Reorder the store by ascending consumption, ties by ascending id
    ///
    /// Equal consumptions tie, so `-0.0` and `0.0` fall back to id order.
    pub fn sort_by_consumption(&self) -> WattbookResult<Vec<Client>> {
        self.sort_with(|a, b| {
            a.consumption
                .partial_cmp(&b.consumption)
                .unwrap_or(Ordering::Equal)
                .then(a.id.cmp(&b.id))
        })
    }

    /// Reorder the store by ascending id
    pub fn sort_by_id(&self) -> WattbookResult<Vec<Client>> {
        self.sort_with(|a, b| a.id.cmp(&b.id))
    }

    fn sort_with<F>(&self, compare: F) -> WattbookResult<Vec<Client>>
    where
        F: FnMut(&Client, &Client) -> Ordering,
    {
        let mut clients = self.store.load()?;
        clients.sort_by(compare);
        self.store.save(&clients)?;

        info!(count = clients.len(), "clients reordered");
        Ok(clients)
    }
}

/// Wrap operator text in a fixed-width field, rejecting values that don't fit
fn bounded<const N: usize>(label: &str, value: &str) -> WattbookResult<FixedText<N>> {
    FixedText::new(value.trim()).map_err(|e| WattbookError::Validation(format!("{}: {}", label, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, ClientRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("clients.dat");
        let repo = ClientRepository::new(path);
        (temp_dir, repo)
    }

    fn add(repo: &ClientRepository, name: &str, consumption: f64) -> Client {
        repo.add(name, "1 Grid Rd", "555-0100", consumption, 0.1, 0.0)
            .unwrap()
    }

    fn ids(clients: &[Client]) -> Vec<i32> {
        clients.iter().map(|c| c.id.get()).collect()
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_ids_follow_max_plus_one() {
        let (_temp_dir, repo) = create_test_repo();
        assert_eq!(add(&repo, "a", 1.0).id.get(), 1);
        assert_eq!(add(&repo, "b", 1.0).id.get(), 2);
        assert_eq!(add(&repo, "c", 1.0).id.get(), 3);

        // Deleting a middle record doesn't lower the max
        repo.delete(ClientId::new(2)).unwrap();
        assert_eq!(add(&repo, "d", 1.0).id.get(), 4);
    }

    #[test]
    fn test_next_id_pure() {
        assert_eq!(ClientRepository::next_id(&[]).unwrap(), ClientId::new(1));
    }

    #[test]
    fn test_add_rejects_empty_fields() {
        let (_temp_dir, repo) = create_test_repo();
        let err = repo.add("", "addr", "555", 1.0, 1.0, 0.0).unwrap_err();
        assert!(err.is_validation());
        let err = repo.add("n", "  ", "555", 1.0, 1.0, 0.0).unwrap_err();
        assert!(err.is_validation());
        let err = repo.add("n", "addr", "", 1.0, 1.0, 0.0).unwrap_err();
        assert!(err.is_validation());
        assert!(!repo.store().path().exists());
    }

    #[test]
    fn test_add_rejects_negative_numbers() {
        let (_temp_dir, repo) = create_test_repo();
        assert!(repo.add("n", "a", "p", -1.0, 1.0, 0.0).unwrap_err().is_validation());
        assert!(repo.add("n", "a", "p", 1.0, -1.0, 0.0).unwrap_err().is_validation());
        assert!(repo.add("n", "a", "p", 1.0, 1.0, -0.01).unwrap_err().is_validation());
    }

    #[test]
    fn test_add_rejects_overlong_name() {
        let (_temp_dir, repo) = create_test_repo();
        let name = "x".repeat(50);
        let err = repo.add(&name, "a", "p", 1.0, 1.0, 0.0).unwrap_err();
        assert!(err.is_validation());
        assert!(repo.add(&"x".repeat(49), "a", "p", 1.0, 1.0, 0.0).is_ok());
    }

    #[test]
    fn test_update() {
        let (_temp_dir, repo) = create_test_repo();
        let client = add(&repo, "a", 10.0);

        let updated = repo.update(client.id, 55.0, 0.3).unwrap();
        assert_eq!(updated.before.consumption, 10.0);
        assert_eq!(updated.after.consumption, 55.0);

        let stored = repo.find_by_id(client.id).unwrap().unwrap();
        assert_eq!(stored.consumption, 55.0);
        assert_eq!(stored.rate, 0.3);
        assert_eq!(stored.name.as_str(), "a");
    }

    #[test]
    fn test_update_errors() {
        let (_temp_dir, repo) = create_test_repo();
        let client = add(&repo, "a", 10.0);

        assert!(repo.update(ClientId::new(99), 1.0, 1.0).unwrap_err().is_not_found());

        let before = fs::read(repo.store().path()).unwrap();
        assert!(repo.update(client.id, -1.0, 1.0).unwrap_err().is_validation());
        assert_eq!(fs::read(repo.store().path()).unwrap(), before);
    }

    #[test]
    fn test_delete_preserves_order() {
        let (_temp_dir, repo) = create_test_repo();
        for name in ["a", "b", "c", "d"] {
            add(&repo, name, 1.0);
        }

        let removed = repo.delete(ClientId::new(2)).unwrap();
        assert_eq!(removed.name.as_str(), "b");
        assert_eq!(ids(&repo.list().unwrap()), vec![1, 3, 4]);
    }

    #[test]
    fn test_delete_missing() {
        let (_temp_dir, repo) = create_test_repo();
        add(&repo, "a", 1.0);
        assert!(repo.delete(ClientId::new(5)).unwrap_err().is_not_found());
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_find_by_name_is_exact() {
        let (_temp_dir, repo) = create_test_repo();
        add(&repo, "Alice", 1.0);
        add(&repo, "Alice", 2.0);

        let found = repo.find_by_name("Alice").unwrap().unwrap();
        assert_eq!(found.id.get(), 1);
        assert!(repo.find_by_name("alice").unwrap().is_none());
    }

    #[test]
    fn test_sort_by_consumption_breaks_ties_by_id() {
        let (_temp_dir, repo) = create_test_repo();
        let seed = vec![
            Client::new(
                ClientId::new(3),
                ClientName::new("c").unwrap(),
                ClientAddress::new("a").unwrap(),
                ClientPhone::new("p").unwrap(),
                10.0,
                0.1,
                0.0,
            ),
            Client::new(
                ClientId::new(1),
                ClientName::new("a").unwrap(),
                ClientAddress::new("a").unwrap(),
                ClientPhone::new("p").unwrap(),
                10.0,
                0.1,
                0.0,
            ),
            Client::new(
                ClientId::new(2),
                ClientName::new("b").unwrap(),
                ClientAddress::new("a").unwrap(),
                ClientPhone::new("p").unwrap(),
                5.0,
                0.1,
                0.0,
            ),
        ];
        repo.store().save(&seed).unwrap();

        repo.sort_by_consumption().unwrap();
        assert_eq!(ids(&repo.list().unwrap()), vec![2, 1, 3]);

        repo.sort_by_id().unwrap();
        assert_eq!(ids(&repo.list().unwrap()), vec![1, 2, 3]);
    }

    #[test]
    fn test_sort_treats_negative_zero_as_tie() {
        let (_temp_dir, repo) = create_test_repo();
        add(&repo, "a", 0.0);
        add(&repo, "b", -0.0);

        repo.sort_by_consumption().unwrap();
        assert_eq!(ids(&repo.list().unwrap()), vec![1, 2]);
    }

    #[test]
    fn test_non_utf8_name_loads_and_survives_save() {
        let (_temp_dir, repo) = create_test_repo();
        add(&repo, "Jose", 1.0);

        // Latin-1 e-acute in place of the final 'e'
        let mut bytes = fs::read(repo.store().path()).unwrap();
        bytes[7] = 0xe9;
        fs::write(repo.store().path(), &bytes).unwrap();

        let clients = repo.list().unwrap();
        assert_eq!(clients[0].name.as_str(), "Jos\u{fffd}");
        assert_eq!(clients[0].name.as_bytes(), b"Jos\xe9");

        add(&repo, "Ana", 2.0);
        let saved = fs::read(repo.store().path()).unwrap();
        assert_eq!(&saved[..200], &bytes[..]);
        assert_eq!(repo.find_by_id(ClientId::new(1)).unwrap().unwrap().name.len(), 4);
    }
}
