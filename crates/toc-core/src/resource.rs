//! 資源模型

use serde::{Deserialize, Serialize};

use crate::{Result, TocError};

/// 資源（工作站、機台或其他有限產能）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// 資源ID
    pub resource_id: String,

    /// 可用產能（分鐘/週或同等時間單位）
    pub capacity: f64,
}

impl Resource {
    /// 創建新的資源
    pub fn new(resource_id: impl Into<String>, capacity: f64) -> Self {
        Self {
            resource_id: resource_id.into(),
            capacity,
        }
    }

    /// 計算負荷係數（耗用 / 產能）
    ///
    /// 產能小於等於零時無法計算，回傳 `ZeroCapacity`。
    pub fn load_factor(&self, consumption: f64) -> Result<f64> {
        if self.capacity <= 0.0 {
            return Err(TocError::ZeroCapacity {
                resource_id: self.resource_id.clone(),
            });
        }
        Ok(consumption / self.capacity)
    }

    /// 創建本次分析使用的工作產能
    pub fn working_capacity(&self) -> WorkingCapacity {
        WorkingCapacity::new(self.resource_id.clone(), self.capacity)
    }
}

/// 工作產能（分配期間的可變影子副本）
#[derive(Debug, Clone, PartialEq)]
pub struct WorkingCapacity {
    /// 資源ID
    pub resource_id: String,

    /// 原始產能
    pub capacity: f64,

    /// 剩餘產能（直接扣減，避免以 capacity - consumed 反推時的捨入誤差）
    remaining: f64,
}

impl WorkingCapacity {
    /// 創建新的工作產能（全額可用）
    pub fn new(resource_id: String, capacity: f64) -> Self {
        Self {
            resource_id,
            capacity,
            remaining: capacity,
        }
    }

    /// 剩餘產能
    pub fn remaining(&self) -> f64 {
        self.remaining
    }

    /// 已佔用產能
    pub fn consumed(&self) -> f64 {
        self.capacity - self.remaining
    }

    /// 佔用產能
    pub fn consume(&mut self, amount: f64) {
        self.remaining -= amount;
    }

    /// 檢查是否超出產能（容差相對於產能規模）
    pub fn is_over_committed(&self, tolerance: f64) -> bool {
        self.remaining < -(tolerance * self.capacity.max(1.0))
    }
}
