//! Suspension policy engine
//!
//! Per-company lifecycle: active -> (overdue beyond grace period) ->
//! suspended -> (payment received) -> active. Suspension deactivates every
//! staff account in the company's tenant; restore reactivates only the
//! accounts the engine itself suspended.
//!
//! Companies overdue beyond `max_overdue_days` are never auto-suspended;
//! they are routed to manual review instead.

use careconnect_core::{
    models::{SuspendedCompany, SuspensionCandidate, SuspensionReport},
    traits::{CompanyRepository, InvoiceRepository, StaffRepository},
    AppError, AppResult, BillingPolicy,
};
use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::cycle;

/// Suspension engine over the invoice, staff, and company repositories
pub struct SuspensionEngine<I, S, C>
where
    I: InvoiceRepository,
    S: StaffRepository,
    C: CompanyRepository,
{
    invoice_repo: Arc<I>,
    staff_repo: Arc<S>,
    company_repo: Arc<C>,
    policy: BillingPolicy,
}

impl<I, S, C> SuspensionEngine<I, S, C>
where
    I: InvoiceRepository,
    S: StaffRepository,
    C: CompanyRepository,
{
    /// Create a new suspension engine with an explicit policy
    pub fn new(
        invoice_repo: Arc<I>,
        staff_repo: Arc<S>,
        company_repo: Arc<C>,
        policy: BillingPolicy,
    ) -> Self {
        Self {
            invoice_repo,
            staff_repo,
            company_repo,
            policy,
        }
    }

    /// Companies currently eligible for automatic suspension
    ///
    /// Scans pending invoices due more than `grace_period_days` ago,
    /// restricted to companies that still have active staff, and keeps
    /// companies whose oldest unpaid invoice is at least the grace period
    /// overdue.
    #[instrument(skip(self))]
    pub async fn companies_for_auto_suspension(&self) -> AppResult<Vec<SuspensionCandidate>> {
        let now = Utc::now();
        let cutoff = now - Duration::days(self.policy.grace_period_days);

        let overdue = self.invoice_repo.overdue_pending_by_company(cutoff).await?;

        let candidates: Vec<SuspensionCandidate> = overdue
            .into_iter()
            .map(|o| {
                let days_overdue = cycle::days_overdue(o.oldest_due_date, now);
                SuspensionCandidate {
                    company_id: o.company_id,
                    company_name: o.company_name,
                    total_overdue: o.total_overdue,
                    invoice_count: o.invoice_count,
                    oldest_due_date: o.oldest_due_date,
                    days_overdue,
                }
            })
            .filter(|c| c.days_overdue >= self.policy.grace_period_days)
            .collect();

        info!("{} companies eligible for auto-suspension", candidates.len());

        Ok(candidates)
    }

    /// Run one suspension pass over all eligible companies
    ///
    /// A company overdue beyond the safety cap lands in `manual_review`. A
    /// company that fails to suspend lands in `errors`; the loop continues
    /// so one failure never aborts the batch.
    #[instrument(skip(self))]
    pub async fn process_auto_suspensions(&self) -> AppResult<SuspensionReport> {
        let candidates = self.companies_for_auto_suspension().await?;
        let mut report = SuspensionReport::default();

        for candidate in candidates {
            if candidate.days_overdue > self.policy.max_overdue_days {
                warn!(
                    "Company {} is {} days overdue, beyond the {}-day cap; flagging for manual review",
                    candidate.company_name, candidate.days_overdue, self.policy.max_overdue_days
                );
                report.manual_review.push(candidate);
                continue;
            }

            match self.suspend_company_access(candidate.company_id).await {
                Ok(users_suspended) => {
                    info!(
                        "Suspended company {} ({} staff accounts, {} days overdue)",
                        candidate.company_name, users_suspended, candidate.days_overdue
                    );
                    report.suspended.push(SuspendedCompany {
                        company_id: candidate.company_id,
                        company_name: candidate.company_name,
                        users_suspended,
                        days_overdue: candidate.days_overdue,
                    });
                }
                Err(e) => {
                    warn!("Failed to suspend company {}: {}", candidate.company_name, e);
                    report.errors.push(format!(
                        "{} ({}): {}",
                        candidate.company_name, candidate.company_id, e
                    ));
                }
            }
        }

        info!(
            "Suspension run complete: {} suspended, {} for manual review, {} errors",
            report.suspended.len(),
            report.manual_review.len(),
            report.errors.len()
        );

        Ok(report)
    }

    /// Deactivate every staff account in a company's tenant
    ///
    /// Returns the number of accounts deactivated. A company without a
    /// tenant is a hard error.
    #[instrument(skip(self))]
    pub async fn suspend_company_access(&self, company_id: Uuid) -> AppResult<u64> {
        let tenant_id = self.resolve_tenant(company_id).await?;
        self.staff_repo.suspend_tenant_staff(tenant_id).await
    }

    /// Reactivate the staff accounts this engine suspended
    ///
    /// Accounts deactivated by other means are left untouched.
    #[instrument(skip(self))]
    pub async fn restore_company_access(&self, company_id: Uuid) -> AppResult<u64> {
        let tenant_id = self.resolve_tenant(company_id).await?;
        self.staff_repo.restore_tenant_staff(tenant_id).await
    }

    async fn resolve_tenant(&self, company_id: Uuid) -> AppResult<Uuid> {
        if self.company_repo.find_by_id(company_id).await?.is_none() {
            return Err(AppError::CompanyNotFound(company_id.to_string()));
        }

        self.company_repo
            .tenant_id_of(company_id)
            .await?
            .ok_or_else(|| AppError::TenantNotFound(company_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use careconnect_core::models::{Company, CompanyStatus, OverdueCompany, RoleCount};
    use chrono::{DateTime, Utc};
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MockInvoiceRepo {
        rows: Vec<OverdueCompany>,
    }

    #[async_trait]
    impl InvoiceRepository for MockInvoiceRepo {
        async fn overdue_pending_by_company(
            &self,
            cutoff: DateTime<Utc>,
        ) -> AppResult<Vec<OverdueCompany>> {
            // mirror the SQL filter: only invoices due before the cutoff
            Ok(self
                .rows
                .iter()
                .filter(|r| r.oldest_due_date < cutoff)
                .cloned()
                .collect())
        }
    }

    struct MockStaffRepo {
        fail_tenants: Vec<Uuid>,
        suspended: Mutex<Vec<Uuid>>,
        restored: Mutex<Vec<Uuid>>,
    }

    impl MockStaffRepo {
        fn new(fail_tenants: Vec<Uuid>) -> Self {
            Self {
                fail_tenants,
                suspended: Mutex::new(Vec::new()),
                restored: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl StaffRepository for MockStaffRepo {
        async fn count_active_by_role(
            &self,
            _tenant_id: Option<Uuid>,
        ) -> AppResult<Vec<RoleCount>> {
            Ok(vec![])
        }

        async fn suspend_tenant_staff(&self, tenant_id: Uuid) -> AppResult<u64> {
            if self.fail_tenants.contains(&tenant_id) {
                return Err(AppError::Database("deadlock detected".to_string()));
            }
            self.suspended.lock().unwrap().push(tenant_id);
            Ok(3)
        }

        async fn restore_tenant_staff(&self, tenant_id: Uuid) -> AppResult<u64> {
            self.restored.lock().unwrap().push(tenant_id);
            Ok(2)
        }
    }

    struct MockCompanyRepo {
        tenants: HashMap<Uuid, Uuid>,
        companies_without_tenant: Vec<Uuid>,
    }

    #[async_trait]
    impl CompanyRepository for MockCompanyRepo {
        async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Company>> {
            if self.tenants.contains_key(&id) || self.companies_without_tenant.contains(&id) {
                let now = Utc::now();
                Ok(Some(Company {
                    id,
                    name: "Sunrise Care".to_string(),
                    status: CompanyStatus::Active,
                    created_at: now,
                    updated_at: now,
                }))
            } else {
                Ok(None)
            }
        }

        async fn tenant_id_of(&self, company_id: Uuid) -> AppResult<Option<Uuid>> {
            Ok(self.tenants.get(&company_id).copied())
        }

        async fn list(&self, _limit: i64, _offset: i64) -> AppResult<Vec<Company>> {
            Ok(vec![])
        }

        async fn count(&self) -> AppResult<i64> {
            Ok(self.tenants.len() as i64)
        }
    }

    fn overdue(company_id: Uuid, days: i64) -> OverdueCompany {
        OverdueCompany {
            company_id,
            company_name: format!("Company {}", &company_id.to_string()[..8]),
            total_overdue: dec!(1200.00),
            invoice_count: 2,
            oldest_due_date: Utc::now() - Duration::days(days),
        }
    }

    fn policy() -> BillingPolicy {
        BillingPolicy::default() // grace 60, cap 90
    }

    #[tokio::test]
    async fn test_eligibility_respects_grace_period() {
        let company = Uuid::new_v4();
        let tenant = Uuid::new_v4();

        let engine = SuspensionEngine::new(
            Arc::new(MockInvoiceRepo {
                rows: vec![overdue(company, 65)],
            }),
            Arc::new(MockStaffRepo::new(vec![])),
            Arc::new(MockCompanyRepo {
                tenants: HashMap::from([(company, tenant)]),
                companies_without_tenant: vec![],
            }),
            policy(),
        );

        let candidates = engine.companies_for_auto_suspension().await.unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].days_overdue, 65);
    }

    #[tokio::test]
    async fn test_within_grace_period_not_eligible() {
        let company = Uuid::new_v4();

        let engine = SuspensionEngine::new(
            Arc::new(MockInvoiceRepo {
                rows: vec![overdue(company, 45)],
            }),
            Arc::new(MockStaffRepo::new(vec![])),
            Arc::new(MockCompanyRepo {
                tenants: HashMap::new(),
                companies_without_tenant: vec![],
            }),
            policy(),
        );

        let candidates = engine.companies_for_auto_suspension().await.unwrap();
        assert!(candidates.is_empty());
    }

    #[tokio::test]
    async fn test_beyond_cap_goes_to_manual_review() {
        let company = Uuid::new_v4();
        let tenant = Uuid::new_v4();
        let staff_repo = Arc::new(MockStaffRepo::new(vec![]));

        let engine = SuspensionEngine::new(
            Arc::new(MockInvoiceRepo {
                rows: vec![overdue(company, 120)],
            }),
            staff_repo.clone(),
            Arc::new(MockCompanyRepo {
                tenants: HashMap::from([(company, tenant)]),
                companies_without_tenant: vec![],
            }),
            policy(),
        );

        let report = engine.process_auto_suspensions().await.unwrap();
        assert!(report.suspended.is_empty());
        assert_eq!(report.manual_review.len(), 1);
        assert_eq!(report.manual_review[0].company_id, company);
        // suspend must never have been attempted
        assert!(staff_repo.suspended.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_suspends_between_grace_and_cap() {
        let company = Uuid::new_v4();
        let tenant = Uuid::new_v4();
        let staff_repo = Arc::new(MockStaffRepo::new(vec![]));

        let engine = SuspensionEngine::new(
            Arc::new(MockInvoiceRepo {
                rows: vec![overdue(company, 75)],
            }),
            staff_repo.clone(),
            Arc::new(MockCompanyRepo {
                tenants: HashMap::from([(company, tenant)]),
                companies_without_tenant: vec![],
            }),
            policy(),
        );

        let report = engine.process_auto_suspensions().await.unwrap();
        assert_eq!(report.suspended.len(), 1);
        assert_eq!(report.suspended[0].users_suspended, 3);
        assert!(report.errors.is_empty());
        assert_eq!(*staff_repo.suspended.lock().unwrap(), vec![tenant]);
    }

    #[tokio::test]
    async fn test_one_failure_does_not_abort_batch() {
        let failing = Uuid::new_v4();
        let failing_tenant = Uuid::new_v4();
        let healthy = Uuid::new_v4();
        let healthy_tenant = Uuid::new_v4();

        let engine = SuspensionEngine::new(
            Arc::new(MockInvoiceRepo {
                rows: vec![overdue(failing, 70), overdue(healthy, 80)],
            }),
            Arc::new(MockStaffRepo::new(vec![failing_tenant])),
            Arc::new(MockCompanyRepo {
                tenants: HashMap::from([(failing, failing_tenant), (healthy, healthy_tenant)]),
                companies_without_tenant: vec![],
            }),
            policy(),
        );

        let report = engine.process_auto_suspensions().await.unwrap();
        assert_eq!(report.suspended.len(), 1);
        assert_eq!(report.suspended[0].company_id, healthy);
        assert_eq!(report.errors.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_tenant_is_hard_error_for_direct_call() {
        let company = Uuid::new_v4();

        let engine = SuspensionEngine::new(
            Arc::new(MockInvoiceRepo { rows: vec![] }),
            Arc::new(MockStaffRepo::new(vec![])),
            Arc::new(MockCompanyRepo {
                tenants: HashMap::new(),
                companies_without_tenant: vec![company],
            }),
            policy(),
        );

        let err = engine.suspend_company_access(company).await.unwrap_err();
        assert!(matches!(err, AppError::TenantNotFound(_)));
    }

    #[tokio::test]
    async fn test_unknown_company_not_found() {
        let engine = SuspensionEngine::new(
            Arc::new(MockInvoiceRepo { rows: vec![] }),
            Arc::new(MockStaffRepo::new(vec![])),
            Arc::new(MockCompanyRepo {
                tenants: HashMap::new(),
                companies_without_tenant: vec![],
            }),
            policy(),
        );

        let err = engine.restore_company_access(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::CompanyNotFound(_)));
    }

    #[tokio::test]
    async fn test_restore_goes_through_tenant() {
        let company = Uuid::new_v4();
        let tenant = Uuid::new_v4();
        let staff_repo = Arc::new(MockStaffRepo::new(vec![]));

        let engine = SuspensionEngine::new(
            Arc::new(MockInvoiceRepo { rows: vec![] }),
            staff_repo.clone(),
            Arc::new(MockCompanyRepo {
                tenants: HashMap::from([(company, tenant)]),
                companies_without_tenant: vec![],
            }),
            policy(),
        );

        let restored = engine.restore_company_access(company).await.unwrap();
        assert_eq!(restored, 2);
        assert_eq!(*staff_repo.restored.lock().unwrap(), vec![tenant]);
    }
}
