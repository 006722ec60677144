//! ID type wrappers for type safety.

mod id_macro;

use serde::{Deserialize, Serialize};

/// Identifier of a company (tenant).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompanyId(String);

/// Identifier of an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

/// Identifier of a branch (physical location) within a company.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BranchId(String);

id_macro::impl_id!(CompanyId, UserId, BranchId);
