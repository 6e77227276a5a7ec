use agro_core::Result;
use agro_types::{CropProfile, Farmer};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// 主体目录接口：提供农户清单与各农户的作物阈值档案。
/// 由外部 CRUD 层实现，这里只约定查询边界。
#[async_trait]
pub trait SubjectDirectory: Send + Sync {
    async fn list_farmers(&self) -> Result<Vec<Farmer>>;

    async fn find_farmer(&self, farmer_id: i64) -> Result<Option<Farmer>>;

    /// 农户的作物档案，可能为空
    async fn crops_of(&self, farmer_id: i64) -> Result<Vec<CropProfile>>;
}

/// 主体目录（内存实现）
pub struct MemoryDirectory {
    farmers: Arc<RwLock<HashMap<i64, Farmer>>>,
    crops: Arc<RwLock<Vec<CropProfile>>>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self {
            farmers: Arc::new(RwLock::new(HashMap::new())),
            crops: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn register_farmer(&self, farmer: Farmer) {
        let mut farmers = self.farmers.write().await;
        farmers.insert(farmer.id, farmer);
    }

    pub async fn register_crop(&self, crop: CropProfile) {
        let mut crops = self.crops.write().await;
        crops.push(crop);
    }
}

impl Default for MemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubjectDirectory for MemoryDirectory {
    async fn list_farmers(&self) -> Result<Vec<Farmer>> {
        let farmers = self.farmers.read().await;
        let mut list: Vec<Farmer> = farmers.values().cloned().collect();
        list.sort_by_key(|f| f.id);
        Ok(list)
    }

    async fn find_farmer(&self, farmer_id: i64) -> Result<Option<Farmer>> {
        let farmers = self.farmers.read().await;
        Ok(farmers.get(&farmer_id).cloned())
    }

    async fn crops_of(&self, farmer_id: i64) -> Result<Vec<CropProfile>> {
        let crops = self.crops.read().await;
        Ok(crops
            .iter()
            .filter(|c| c.farmer_id == farmer_id)
            .cloned()
            .collect())
    }
}
