//! # bkt-algo - 贝叶斯知识追踪核心算法库
//!
//! 根据学习者的答题记录估计其掌握某个概念的概率，并据此挑选下一批练习:
//!
//! - **Posterior Updater** - 单次作答的贝叶斯后验更新 (含学习迁移)
//! - **Sequence Replayer** - 由完整作答日志重建掌握度轨迹
//! - **Question Ranker** - 按预测难度与当前掌握度的匹配程度排序候选题
//! - **Concept Hierarchy Filter** - 按父/子/目标概念分桶限量选题
//!
//! ## 设计理念
//!
//! - **纯函数** - 所有操作只依赖参数，调用之间不缓存任何状态
//! - **只读快照** - 参数表与概念图构建时校验，之后只读
//! - **显式错误** - 非法输入与退化分母返回 [`BktError`]，不做静默回退
//!
//! ## 模块结构
//!
//! - [`posterior`] - 后验更新与预测正确率
//! - [`replay`] - 历史回放 (轨迹、预测正确率序列、按用户批量重算)
//! - [`ranker`] - 候选题排序
//! - [`hierarchy`] - 概念层级过滤
//! - [`recommend`] - 实时推荐流程
//! - [`graph`] - 概念先修关系图
//! - [`params`] - 题目/概念参数表
//! - [`sanitize`] - 数值校验
//! - [`types`] - 公共类型和常量
//!
//! ## 使用示例
//!
//! ```rust
//! use bkt_algo::{update, Item, ItemTable, Modality};
//!
//! let items = ItemTable::new(vec![Item {
//!     eid: "e1".to_string(),
//!     concept: "loops".to_string(),
//!     slip: 0.1,
//!     guess: 0.2,
//!     modality: Modality::Read,
//! }])
//! .unwrap();
//!
//! let p = update(true, "e1", 0.0, &items, 0.5).unwrap();
//! assert!((p - 0.8182).abs() < 1e-4);
//! ```

// ============================================================================
// 模块声明
// ============================================================================

pub mod error;
pub mod graph;
pub mod hierarchy;
pub mod params;
pub mod posterior;
pub mod ranker;
pub mod recommend;
pub mod replay;
pub mod sanitize;
pub mod types;

// ============================================================================
// 重新导出
// ============================================================================

/// 重新导出所有公共类型
pub use types::*;

pub use error::{BktError, ErrorKind, Result};
pub use graph::{ConceptGraph, ConceptMap};
pub use hierarchy::filter_by_hierarchy;
pub use params::{ConceptTable, ItemTable};
pub use posterior::{pcorrect, update};
pub use ranker::{order_candidate_ids, order_candidates};
pub use recommend::{recommend, Recommendation, RecommendConfig, RecommendInput};
pub use replay::{predicted_correctness, replay, replay_user, ConceptTrajectory};
