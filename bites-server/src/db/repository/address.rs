//! Address Repository

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, record_key, record_ref};
use crate::db::models::{Address, AddressCreate, AddressUpdate};

const ADDRESS_TABLE: &str = "address";

#[derive(Clone)]
pub struct AddressRepository {
    base: BaseRepository,
}

impl AddressRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Active (non-deleted) addresses for one user, newest first
    pub async fn find_active_for_user(&self, user: &RecordId) -> RepoResult<Vec<Address>> {
        let addresses: Vec<Address> = self
            .base
            .db()
            .query("SELECT * FROM address WHERE user = $user AND status = true ORDER BY created_at DESC")
            .bind(("user", user.to_string()))
            .await?
            .take(0)?;
        Ok(addresses)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Address>> {
        let key = record_key(ADDRESS_TABLE, id).to_string();
        let address: Option<Address> = self.base.db().select((ADDRESS_TABLE, key)).await?;
        Ok(address)
    }

    pub async fn create(&self, user: RecordId, data: AddressCreate) -> RepoResult<Address> {
        let address = Address {
            id: None,
            hostel_name: data.hostel_name,
            room_number: data.room_number,
            mobile: data.mobile,
            status: true,
            user,
            created_at: chrono::Utc::now().to_rfc3339(),
        };

        let created: Option<Address> = self.base.db().create(ADDRESS_TABLE).content(address).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create address".to_string()))
    }

    pub async fn update(&self, id: &str, data: AddressUpdate) -> RepoResult<Address> {
        let rid = record_ref(ADDRESS_TABLE, id);

        let mut set_parts: Vec<&str> = Vec::new();
        if data.hostel_name.is_some() {
            set_parts.push("hostel_name = $hostel_name");
        }
        if data.room_number.is_some() {
            set_parts.push("room_number = $room_number");
        }
        if data.mobile.is_some() {
            set_parts.push("mobile = $mobile");
        }

        if set_parts.is_empty() {
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Address {} not found", id)));
        }

        let query_str = format!(
            "UPDATE type::record($rid) SET {} RETURN AFTER",
            set_parts.join(", ")
        );

        let mut query = self.base.db().query(query_str).bind(("rid", rid));
        if let Some(v) = data.hostel_name {
            query = query.bind(("hostel_name", v));
        }
        if let Some(v) = data.room_number {
            query = query.bind(("room_number", v));
        }
        if let Some(v) = data.mobile {
            query = query.bind(("mobile", v));
        }

        let mut result = query.await?;
        let addresses: Vec<Address> = result.take(0)?;
        addresses
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Address {} not found", id)))
    }

    /// Soft delete: historical orders keep referencing the row
    pub async fn disable(&self, id: &str) -> RepoResult<Address> {
        let rid = record_ref(ADDRESS_TABLE, id);
        let mut result = self
            .base
            .db()
            .query("UPDATE type::record($rid) SET status = false RETURN AFTER")
            .bind(("rid", rid))
            .await?;
        let addresses: Vec<Address> = result.take(0)?;
        addresses
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Address {} not found", id)))
    }
}
