//! Kubernetes client for compliance operator resources.
//!
//! Reads ComplianceSuites, ComplianceScans, ComplianceCheckResults and
//! ComplianceRemediations through the dynamic API, plus operator/scanner pods,
//! events and pod logs through the typed core/v1 API. Every read is a single
//! request: errors are returned as they are, with the operation and resource
//! name attached, and are never retried.
//!
//! # Example
//!
//! ```rust,ignore
//! use compliance_inspector::compliance::{ClusterAccess, ComplianceClient};
//!
//! let client = ComplianceClient::new("openshift-compliance").await?;
//! for suite in client.list_suites().await? {
//!     println!("{}: {} / {}", suite.name, suite.phase, suite.result);
//! }
//! ```

use super::query::{
    COMPLIANCE_GROUP, COMPLIANCE_VERSION, EventQuery, LabelKey, LabelQuery, ResourceKind,
    validate_object_name,
};
use super::types::{
    CheckResult, CheckSeverity, CheckStatus, ComplianceScan, ComplianceSuite,
    ContainerStateDetail, ContainerView, EventType, EventView, PodConditionView, PodPhase,
    PodView, Remediation, ScanPhase, ScanResult, ScanStatusSummary, ScanType, empty_as_default,
};
use crate::error::{ComplianceError, Result};
use chrono::{DateTime, Utc};
use futures_util::io::AsyncReadExt;
use k8s_openapi::api::core::v1::{ContainerState, Event, Pod};
use kube::{
    Client, Config, ResourceExt,
    api::{Api, ApiResource, DynamicObject, GroupVersionKind, ListParams, LogParams},
};
use log::{debug, warn};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::future::Future;

/// Upper bound on the number of log bytes read from one pod.
pub const LOG_BUFFER_BYTES: u64 = 1024 * 1024;

// ============================================================================
// Access trait
// ============================================================================

/// Read access to compliance state in one namespace.
///
/// The collector, the analyzer and the tools only talk to the cluster through
/// this trait.
pub trait ClusterAccess: Send + Sync {
    /// Namespace all reads are scoped to.
    fn namespace(&self) -> &str;

    /// Same connection, scoped to another namespace.
    fn in_namespace(&self, namespace: &str) -> Self
    where
        Self: Sized;

    fn list_suites(&self) -> impl Future<Output = Result<Vec<ComplianceSuite>>> + Send;

    fn get_suite(&self, name: &str) -> impl Future<Output = Result<ComplianceSuite>> + Send;

    /// All scans, or only those owned by `suite`.
    fn list_scans(
        &self,
        suite: Option<&str>,
    ) -> impl Future<Output = Result<Vec<ComplianceScan>>> + Send;

    fn get_scan(&self, name: &str) -> impl Future<Output = Result<ComplianceScan>> + Send;

    /// Check results owned by `scan`, optionally narrowed to one status.
    fn list_check_results(
        &self,
        scan: &str,
        status: Option<CheckStatus>,
    ) -> impl Future<Output = Result<Vec<CheckResult>>> + Send;

    fn get_check_result(&self, name: &str) -> impl Future<Output = Result<CheckResult>> + Send;

    /// Remediations owned by `scan`, or every remediation in the namespace.
    fn list_remediations(
        &self,
        scan: Option<&str>,
    ) -> impl Future<Output = Result<Vec<Remediation>>> + Send;

    fn get_remediation(&self, name: &str) -> impl Future<Output = Result<Remediation>> + Send;

    fn list_operator_pods(&self) -> impl Future<Output = Result<Vec<PodView>>> + Send;

    fn list_scanner_pods(&self, scan: &str) -> impl Future<Output = Result<Vec<PodView>>> + Send;

    fn get_pod(&self, name: &str) -> impl Future<Output = Result<PodView>> + Send;

    /// Events recorded against one object.
    fn list_events(
        &self,
        kind: ResourceKind,
        name: &str,
    ) -> impl Future<Output = Result<Vec<EventView>>> + Send;

    /// Tail of a pod's log, truncated to [`LOG_BUFFER_BYTES`].
    ///
    /// A short read is not an error: whatever arrived before the stream ended
    /// or failed is returned.
    fn pod_logs(&self, pod: &str, tail_lines: i64) -> impl Future<Output = Result<String>> + Send;
}

// ============================================================================
// Kubernetes-backed client
// ============================================================================

/// Compliance client backed by a live cluster.
#[derive(Clone)]
pub struct ComplianceClient {
    client: Client,
    namespace: String,
}

impl ComplianceClient {
    /// Connect with the inferred configuration (KUBECONFIG, ~/.kube/config, in-cluster).
    pub async fn new(namespace: impl Into<String>) -> Result<Self> {
        let config = Config::infer().await?;
        let client = Client::try_from(config).map_err(ComplianceError::ClientCreation)?;
        Ok(Self::from_client(client, namespace))
    }

    /// Connect using a named kubeconfig context.
    pub async fn with_context(context: &str, namespace: impl Into<String>) -> Result<Self> {
        let kubeconfig = kube::config::Kubeconfig::read()?;
        let config = Config::from_custom_kubeconfig(
            kubeconfig,
            &kube::config::KubeConfigOptions {
                context: Some(context.to_string()),
                ..Default::default()
            },
        )
        .await?;
        let client = Client::try_from(config).map_err(ComplianceError::ClientCreation)?;
        Ok(Self::from_client(client, namespace))
    }

    pub fn from_client(client: Client, namespace: impl Into<String>) -> Self {
        Self {
            client,
            namespace: namespace.into(),
        }
    }

    fn custom_api(&self, kind: ResourceKind) -> Api<DynamicObject> {
        let gvk = GroupVersionKind::gvk(COMPLIANCE_GROUP, COMPLIANCE_VERSION, kind.kind());
        let resource = ApiResource::from_gvk_with_plural(&gvk, kind.plural());
        Api::namespaced_with(self.client.clone(), &self.namespace, &resource)
    }

    fn pods(&self) -> Api<Pod> {
        Api::namespaced(self.client.clone(), &self.namespace)
    }

    async fn list_custom(
        &self,
        kind: ResourceKind,
        params: &ListParams,
    ) -> Result<Vec<DynamicObject>> {
        debug!(
            "listing {} in {} (selector: {:?})",
            kind.plural(),
            self.namespace,
            params.label_selector
        );
        let list = self
            .custom_api(kind)
            .list(params)
            .await
            .map_err(|e| ComplianceError::transport(format!("list {}", kind.plural()), e))?;
        Ok(list.items)
    }

    async fn get_custom(&self, kind: ResourceKind, name: &str) -> Result<DynamicObject> {
        validate_object_name(kind, name)?;
        debug!("getting {} {} in {}", kind, name, self.namespace);
        self.custom_api(kind)
            .get_opt(name)
            .await
            .map_err(|e| ComplianceError::transport(format!("get {} {}", kind, name), e))?
            .ok_or_else(|| ComplianceError::not_found(kind, name, &self.namespace))
    }

    async fn list_pods(&self, query: &LabelQuery) -> Result<Vec<PodView>> {
        debug!("listing pods in {} (selector: {})", self.namespace, query.selector());
        let list = self
            .pods()
            .list(&query.list_params())
            .await
            .map_err(|e| {
                ComplianceError::transport(format!("list pods with {}", query.selector()), e)
            })?;
        Ok(list.items.into_iter().map(pod_view).collect())
    }
}

impl ClusterAccess for ComplianceClient {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn in_namespace(&self, namespace: &str) -> Self {
        Self {
            client: self.client.clone(),
            namespace: namespace.to_string(),
        }
    }

    async fn list_suites(&self) -> Result<Vec<ComplianceSuite>> {
        let objects = self
            .list_custom(ResourceKind::Suite, &ListParams::default())
            .await?;
        Ok(decode_list(ResourceKind::Suite, objects, suite_from_object))
    }

    async fn get_suite(&self, name: &str) -> Result<ComplianceSuite> {
        let object = self.get_custom(ResourceKind::Suite, name).await?;
        suite_from_object(object)
    }

    async fn list_scans(&self, suite: Option<&str>) -> Result<Vec<ComplianceScan>> {
        let query = match suite {
            Some(suite) => LabelQuery::scans_of_suite(suite)?,
            None => LabelQuery::new(ResourceKind::Scan),
        };
        let objects = self
            .list_custom(ResourceKind::Scan, &query.list_params())
            .await?;
        Ok(decode_list(ResourceKind::Scan, objects, scan_from_object))
    }

    async fn get_scan(&self, name: &str) -> Result<ComplianceScan> {
        let object = self.get_custom(ResourceKind::Scan, name).await?;
        scan_from_object(object)
    }

    async fn list_check_results(
        &self,
        scan: &str,
        status: Option<CheckStatus>,
    ) -> Result<Vec<CheckResult>> {
        let mut query = LabelQuery::owned_by_scan(ResourceKind::CheckResult, scan)?;
        if let Some(status) = status {
            query = query.eq(LabelKey::CheckStatus, status.as_str())?;
        }
        let objects = self
            .list_custom(ResourceKind::CheckResult, &query.list_params())
            .await?;
        Ok(decode_list(
            ResourceKind::CheckResult,
            objects,
            check_result_from_object,
        ))
    }

    async fn get_check_result(&self, name: &str) -> Result<CheckResult> {
        let object = self.get_custom(ResourceKind::CheckResult, name).await?;
        check_result_from_object(object)
    }

    async fn list_remediations(&self, scan: Option<&str>) -> Result<Vec<Remediation>> {
        let query = match scan {
            Some(scan) => LabelQuery::owned_by_scan(ResourceKind::Remediation, scan)?,
            None => LabelQuery::new(ResourceKind::Remediation),
        };
        let objects = self
            .list_custom(ResourceKind::Remediation, &query.list_params())
            .await?;
        Ok(decode_list(
            ResourceKind::Remediation,
            objects,
            remediation_from_object,
        ))
    }

    async fn get_remediation(&self, name: &str) -> Result<Remediation> {
        let object = self.get_custom(ResourceKind::Remediation, name).await?;
        remediation_from_object(object)
    }

    async fn list_operator_pods(&self) -> Result<Vec<PodView>> {
        self.list_pods(&LabelQuery::operator_pods()).await
    }

    async fn list_scanner_pods(&self, scan: &str) -> Result<Vec<PodView>> {
        self.list_pods(&LabelQuery::scanner_pods(scan)?).await
    }

    async fn get_pod(&self, name: &str) -> Result<PodView> {
        validate_object_name(ResourceKind::Pod, name)?;
        self.pods()
            .get_opt(name)
            .await
            .map_err(|e| ComplianceError::transport(format!("get Pod {}", name), e))?
            .map(pod_view)
            .ok_or_else(|| ComplianceError::not_found(ResourceKind::Pod, name, &self.namespace))
    }

    async fn list_events(&self, kind: ResourceKind, name: &str) -> Result<Vec<EventView>> {
        let query = EventQuery::for_object(kind, name)?;
        debug!(
            "listing events in {} ({})",
            self.namespace,
            query.field_selector()
        );
        let events: Api<Event> = Api::namespaced(self.client.clone(), &self.namespace);
        let list = events
            .list(&query.list_params())
            .await
            .map_err(|e| ComplianceError::transport(format!("list events for {} {}", kind, name), e))?;
        Ok(list.items.into_iter().map(event_view).collect())
    }

    async fn pod_logs(&self, pod: &str, tail_lines: i64) -> Result<String> {
        validate_object_name(ResourceKind::Pod, pod)?;
        let params = LogParams {
            tail_lines: Some(tail_lines),
            ..Default::default()
        };
        let stream = self
            .pods()
            .log_stream(pod, &params)
            .await
            .map_err(|e| ComplianceError::transport(format!("stream logs of pod {}", pod), e))?;
        let mut stream = std::pin::pin!(stream);

        let mut buf = Vec::new();
        let mut limited = stream.as_mut().take(LOG_BUFFER_BYTES);
        if let Err(e) = limited.read_to_end(&mut buf).await {
            warn!(
                "log stream for pod {} ended early after {} bytes: {}",
                pod,
                buf.len(),
                e
            );
        }

        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

// ============================================================================
// Internal types for custom resource payloads
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SuiteObject {
    spec: SuiteSpec,
    status: SuiteStatus,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SuiteSpec {
    auto_apply_remediations: bool,
    schedule: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SuiteStatus {
    #[serde(deserialize_with = "empty_as_default")]
    phase: ScanPhase,
    #[serde(deserialize_with = "empty_as_default")]
    result: ScanResult,
    error_message: Option<String>,
    scan_statuses: Vec<ScanStatusEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ScanStatusEntry {
    name: String,
    #[serde(deserialize_with = "empty_as_default")]
    phase: ScanPhase,
    #[serde(deserialize_with = "empty_as_default")]
    result: ScanResult,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ScanObject {
    spec: ScanSpec,
    status: ScanStatus,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ScanSpec {
    #[serde(deserialize_with = "empty_as_default")]
    scan_type: ScanType,
    profile: String,
    content: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ScanStatus {
    #[serde(deserialize_with = "empty_as_default")]
    phase: ScanPhase,
    #[serde(deserialize_with = "empty_as_default")]
    result: ScanResult,
    error_message: Option<String>,
    start_timestamp: Option<DateTime<Utc>>,
    warnings: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CheckResultObject {
    #[serde(default)]
    id: String,
    status: CheckStatus,
    #[serde(default)]
    severity: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    instructions: String,
    #[serde(default)]
    rationale: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RemediationObject {
    spec: RemediationSpec,
    status: RemediationStatus,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RemediationSpec {
    apply: bool,
    #[serde(rename = "type")]
    remediation_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RemediationStatus {
    application_state: String,
}

// ============================================================================
// Helper functions
// ============================================================================

fn decode<T: DeserializeOwned>(kind: ResourceKind, object: &DynamicObject) -> Result<T> {
    serde_json::from_value(object.data.clone()).map_err(|e| ComplianceError::InvalidResource {
        kind,
        name: object.name_any(),
        reason: e.to_string(),
    })
}

/// Converts every object, skipping (and logging) the ones that do not parse.
fn decode_list<T>(
    kind: ResourceKind,
    objects: Vec<DynamicObject>,
    convert: fn(DynamicObject) -> Result<T>,
) -> Vec<T> {
    objects
        .into_iter()
        .filter_map(|object| match convert(object) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("skipping {}: {}", kind, e);
                None
            }
        })
        .collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

pub(crate) fn suite_from_object(object: DynamicObject) -> Result<ComplianceSuite> {
    let raw: SuiteObject = decode(ResourceKind::Suite, &object)?;
    Ok(ComplianceSuite {
        name: object.name_any(),
        phase: raw.status.phase,
        result: raw.status.result,
        error_message: non_empty(raw.status.error_message),
        auto_apply_remediations: raw.spec.auto_apply_remediations,
        schedule: non_empty(raw.spec.schedule),
        scan_statuses: raw
            .status
            .scan_statuses
            .into_iter()
            .map(|s| ScanStatusSummary {
                name: s.name,
                phase: s.phase,
                result: s.result,
            })
            .collect(),
    })
}

pub(crate) fn scan_from_object(object: DynamicObject) -> Result<ComplianceScan> {
    let raw: ScanObject = decode(ResourceKind::Scan, &object)?;
    Ok(ComplianceScan {
        suite: object.labels().get(LabelKey::Suite.as_str()).cloned(),
        name: object.name_any(),
        scan_type: raw.spec.scan_type,
        profile: raw.spec.profile,
        content: raw.spec.content,
        phase: raw.status.phase,
        result: raw.status.result,
        start_timestamp: raw.status.start_timestamp,
        error_message: non_empty(raw.status.error_message),
        warnings: non_empty(raw.status.warnings),
    })
}

pub(crate) fn check_result_from_object(object: DynamicObject) -> Result<CheckResult> {
    let raw: CheckResultObject = decode(ResourceKind::CheckResult, &object)?;
    Ok(CheckResult {
        name: object.name_any(),
        id: raw.id,
        status: raw.status,
        severity: CheckSeverity::parse_lenient(&raw.severity),
        description: raw.description,
        instructions: raw.instructions,
        rationale: raw.rationale,
    })
}

pub(crate) fn remediation_from_object(object: DynamicObject) -> Result<Remediation> {
    let raw: RemediationObject = decode(ResourceKind::Remediation, &object)?;
    Ok(Remediation {
        name: object.name_any(),
        apply: raw.spec.apply,
        application_state: raw.status.application_state,
        remediation_type: non_empty(raw.spec.remediation_type),
    })
}

fn state_detail(state: Option<&ContainerState>, terminated: bool) -> Option<ContainerStateDetail> {
    let state = state?;
    let (reason, message) = if terminated {
        let t = state.terminated.as_ref()?;
        (t.reason.clone(), t.message.clone())
    } else {
        let w = state.waiting.as_ref()?;
        (w.reason.clone(), w.message.clone())
    };
    Some(ContainerStateDetail {
        reason: reason.unwrap_or_default(),
        message: non_empty(message),
    })
}

/// Convert a core/v1 Pod to the fields diagnosis needs.
pub(crate) fn pod_view(pod: Pod) -> PodView {
    let name = pod.name_any();
    let status = pod.status.unwrap_or_default();

    let conditions = status
        .conditions
        .unwrap_or_default()
        .into_iter()
        .map(|c| PodConditionView {
            condition_type: c.type_,
            status: c.status,
            reason: c.reason,
            message: c.message,
        })
        .collect();

    let containers = status
        .container_statuses
        .unwrap_or_default()
        .into_iter()
        .map(|cs| ContainerView {
            waiting: state_detail(cs.state.as_ref(), false),
            last_terminated: state_detail(cs.last_state.as_ref(), true),
            name: cs.name,
            restart_count: cs.restart_count,
        })
        .collect();

    PodView {
        name,
        phase: status
            .phase
            .as_deref()
            .map(PodPhase::parse)
            .unwrap_or_default(),
        reason: non_empty(status.reason),
        conditions,
        containers,
    }
}

pub(crate) fn event_view(event: Event) -> EventView {
    let event_type = match event.type_.as_deref() {
        Some("Warning") => EventType::Warning,
        _ => EventType::Normal,
    };
    EventView {
        involved_kind: event.involved_object.kind.unwrap_or_default(),
        involved_name: event.involved_object.name.unwrap_or_default(),
        event_type,
        reason: event.reason.unwrap_or_default(),
        message: event.message.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::core::v1::{
        ContainerStateTerminated, ContainerStateWaiting, ContainerStatus, ObjectReference,
        PodCondition, PodStatus,
    };
    use kube::api::ObjectMeta;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn dynamic(name: &str, labels: &[(&str, &str)], data: serde_json::Value) -> DynamicObject {
        let gvk = GroupVersionKind::gvk(COMPLIANCE_GROUP, COMPLIANCE_VERSION, "ComplianceScan");
        let resource = ApiResource::from_gvk_with_plural(&gvk, "compliancescans");
        let mut object = DynamicObject::new(name, &resource).data(data);
        object.metadata.labels = Some(
            labels
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>(),
        );
        object
    }

    #[test]
    fn test_scan_from_object_reads_spec_and_status() {
        let object = dynamic(
            "ocp4-cis",
            &[("compliance.openshift.io/suite", "cis-suite")],
            json!({
                "spec": {"scanType": "Platform", "profile": "xccdf_org.ssgproject.content_profile_cis", "content": "ssg-ocp4-ds.xml"},
                "status": {"phase": "RUNNING", "result": "NOT-AVAILABLE", "startTimestamp": "2024-05-01T10:00:00Z", "warnings": ""}
            }),
        );
        let scan = scan_from_object(object).unwrap();
        assert_eq!(scan.name, "ocp4-cis");
        assert_eq!(scan.suite.as_deref(), Some("cis-suite"));
        assert_eq!(scan.scan_type, ScanType::Platform);
        assert_eq!(scan.phase, ScanPhase::Running);
        assert_eq!(scan.result, ScanResult::NotAvailable);
        assert!(scan.start_timestamp.is_some());
        assert_eq!(scan.warnings, None);
    }

    #[test]
    fn test_scan_without_status_uses_defaults() {
        let scan = scan_from_object(dynamic("fresh", &[], json!({"spec": {}}))).unwrap();
        assert_eq!(scan.phase, ScanPhase::Pending);
        assert_eq!(scan.result, ScanResult::NotAvailable);
        assert_eq!(scan.scan_type, ScanType::Node);
        assert_eq!(scan.start_timestamp, None);
    }

    #[test]
    fn test_unknown_phase_fails_explicitly() {
        let object = dynamic("odd", &[], json!({"status": {"phase": "EXPLODED"}}));
        let err = scan_from_object(object).unwrap_err();
        assert!(matches!(err, ComplianceError::InvalidResource { .. }));
        assert!(err.to_string().contains("EXPLODED"));
    }

    #[test]
    fn test_decode_list_skips_malformed_objects() {
        let good = dynamic("good", &[], json!({"status": {"phase": "DONE", "result": "COMPLIANT"}}));
        let bad = dynamic("bad", &[], json!({"status": {"result": "SORT-OF"}}));
        let scans = decode_list(ResourceKind::Scan, vec![good, bad], scan_from_object);
        assert_eq!(scans.len(), 1);
        assert_eq!(scans[0].name, "good");
    }

    #[test]
    fn test_check_result_requires_known_status() {
        let ok = dynamic(
            "ocp4-cis-api-server-audit-log",
            &[],
            json!({"id": "x", "status": "FAIL", "severity": "High", "description": "d", "instructions": "fix it"}),
        );
        let check = check_result_from_object(ok).unwrap();
        assert_eq!(check.status, CheckStatus::Fail);
        assert_eq!(check.severity, CheckSeverity::High);

        let missing = dynamic("no-status", &[], json!({"id": "y"}));
        assert!(check_result_from_object(missing).is_err());
    }

    #[test]
    fn test_remediation_from_object() {
        let object = dynamic(
            "ocp4-cis-api-server-encryption",
            &[],
            json!({"spec": {"apply": true, "type": "Configuration"}, "status": {"applicationState": "Applied"}}),
        );
        let remediation = remediation_from_object(object).unwrap();
        assert!(remediation.apply);
        assert!(remediation.is_applied());
        assert_eq!(remediation.remediation_type.as_deref(), Some("Configuration"));
    }

    #[test]
    fn test_suite_keeps_scan_status_order() {
        let object = dynamic(
            "cis",
            &[],
            json!({"status": {"phase": "DONE", "result": "NON-COMPLIANT", "scanStatuses": [
                {"name": "b-scan", "phase": "DONE", "result": "COMPLIANT"},
                {"name": "a-scan", "phase": "DONE", "result": "NON-COMPLIANT"}
            ]}}),
        );
        let suite = suite_from_object(object).unwrap();
        let names: Vec<_> = suite.scan_statuses.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["b-scan", "a-scan"]);
        assert_eq!(suite.result, ScanResult::NonCompliant);
    }

    #[test]
    fn test_pod_view_extracts_container_states() {
        let pod = Pod {
            metadata: ObjectMeta {
                name: Some("scanner-1".to_string()),
                ..Default::default()
            },
            status: Some(PodStatus {
                phase: Some("Running".to_string()),
                conditions: Some(vec![PodCondition {
                    type_: "Ready".to_string(),
                    status: "True".to_string(),
                    ..Default::default()
                }]),
                container_statuses: Some(vec![ContainerStatus {
                    name: "scanner".to_string(),
                    restart_count: 3,
                    state: Some(ContainerState {
                        waiting: Some(ContainerStateWaiting {
                            reason: Some("CrashLoopBackOff".to_string()),
                            message: None,
                        }),
                        ..Default::default()
                    }),
                    last_state: Some(ContainerState {
                        terminated: Some(ContainerStateTerminated {
                            reason: Some("OOMKilled".to_string()),
                            exit_code: 137,
                            ..Default::default()
                        }),
                        ..Default::default()
                    }),
                    ..Default::default()
                }]),
                ..Default::default()
            }),
            ..Default::default()
        };

        let view = pod_view(pod);
        assert_eq!(view.phase, PodPhase::Running);
        assert!(view.is_ready());
        let container = &view.containers[0];
        assert_eq!(container.restart_count, 3);
        assert_eq!(container.waiting.as_ref().unwrap().reason, "CrashLoopBackOff");
        assert_eq!(container.last_terminated.as_ref().unwrap().reason, "OOMKilled");
    }

    #[test]
    fn test_event_view_maps_type() {
        let event = Event {
            involved_object: ObjectReference {
                kind: Some("ComplianceScan".to_string()),
                name: Some("ocp4-cis".to_string()),
                ..Default::default()
            },
            type_: Some("Warning".to_string()),
            message: Some("Forbidden".to_string()),
            ..Default::default()
        };
        let view = event_view(event);
        assert_eq!(view.event_type, EventType::Warning);
        assert_eq!(view.involved_name, "ocp4-cis");
    }
}
