//! 仓储层
//!
//! 仓储接口定义与内存实现。服务层只依赖接口，
//! 便于替换真实存储后端和 mock 测试。

mod memory;
mod traits;

pub use memory::{
    InMemoryCampaignRepository, InMemoryCustomerRepository, InMemoryLogRepository,
    InMemoryOrderRepository, InMemorySegmentRepository,
};
pub use traits::{
    CampaignRepositoryTrait, CommunicationLogRepositoryTrait, CustomerRepositoryTrait,
    OrderRepositoryTrait, SegmentRepositoryTrait,
};

#[cfg(test)]
pub use traits::{
    MockCampaignRepositoryTrait, MockCommunicationLogRepositoryTrait, MockCustomerRepositoryTrait,
    MockOrderRepositoryTrait, MockSegmentRepositoryTrait,
};
