//! Engine and checker entry points
//!
//! `Engine` owns the class catalog, scope, resolver and metrics shared by
//! every hint it compiles. `Checker` pairs one compiled hint with the sleuth
//! so a rejection always arrives with its cause.

use std::fmt;
use std::sync::Arc;

use super::compiler::{CheckProcedure, Compiler};
use super::config::{CheckConfig, Verbosity};
use super::errors::{CheckError, CheckResult};
use super::runtime::Runtime;
use crate::hint::Hint;
use crate::observability::{Event, Logger, MetricsRegistry};
use crate::pith::{ClassCatalog, Pith, Represent, TruncatingRepr};
use crate::resolve::Scope;
use crate::sleuth::CauseSleuth;

/// Label used when a hint is compiled without one.
pub const DEFAULT_LABEL: &str = "pith";

/// Outcome of validating one pith.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected(Violation),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }

    pub fn violation(&self) -> Option<&Violation> {
        match self {
            Verdict::Accepted => None,
            Verdict::Rejected(violation) => Some(violation),
        }
    }
}

/// A pith violating a hint, with the diagnosed cause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    label: String,
    hint: String,
    cause: String,
    verbosity: Verbosity,
}

impl Violation {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn hint(&self) -> &str {
        &self.hint
    }

    pub fn cause(&self) -> &str {
        &self.cause
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.verbosity.includes_cause() {
            write!(f, "{} violates type hint {}, as {}.", self.label, self.hint, self.cause)
        } else {
            write!(f, "{} violates type hint {}.", self.label, self.hint)
        }
    }
}

/// Compiles hints and diagnoses violations against one catalog and scope.
pub struct Engine {
    config: CheckConfig,
    runtime: Arc<Runtime>,
    metrics: Arc<MetricsRegistry>,
    represent: Arc<dyn Represent>,
}

impl Engine {
    /// Engine with an empty scope.
    pub fn new(config: CheckConfig) -> CheckResult<Self> {
        Self::with_scope(config, Scope::new())
    }

    /// Engine resolving forward references against `scope`.
    ///
    /// The engine logs through its own logger at the configured level.
    pub fn with_scope(config: CheckConfig, scope: Scope) -> CheckResult<Self> {
        config.validate()?;

        let metrics = Arc::new(MetricsRegistry::new());
        let catalog = Arc::new(ClassCatalog::new());
        let logger = Logger::new(config.log_level);
        let runtime = Arc::new(Runtime::new(catalog, scope, Arc::clone(&metrics), logger));
        let represent: Arc<dyn Represent> = Arc::new(match config.verbosity.repr_limit() {
            Some(limit) => TruncatingRepr::new(limit),
            None => TruncatingRepr::unbounded(),
        });

        let max_depth = config.max_depth.to_string();
        logger.log(
            Event::EngineReady,
            &[
                ("max_depth", max_depth.as_str()),
                ("strategy", config.strategy.as_str()),
                ("verbosity", config.verbosity.as_str()),
            ],
        );

        Ok(Self {
            config,
            runtime,
            metrics,
            represent,
        })
    }

    /// Replace the representer used in cause strings.
    pub fn with_represent(mut self, represent: impl Represent + 'static) -> Self {
        self.represent = Arc::new(represent);
        self
    }

    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ClassCatalog {
        self.runtime.catalog()
    }

    pub fn scope(&self) -> &Scope {
        self.runtime.scope()
    }

    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }

    pub fn logger(&self) -> Logger {
        self.runtime.logger()
    }

    /// Compile a hint into a check procedure.
    pub fn compile(&self, hint: &Hint) -> CheckResult<CheckProcedure> {
        self.compile_labeled(hint, DEFAULT_LABEL)
    }

    /// Compile a hint, naming `label` in definition-time errors.
    pub fn compile_labeled(&self, hint: &Hint, label: &str) -> CheckResult<CheckProcedure> {
        self.compile_with_metrics(hint, label, Arc::clone(&self.metrics))
            .map_err(|err| self.runtime.observe_defect(label, err))
    }

    /// Why `pith` violates `hint`, or `None` if it satisfies it.
    ///
    /// Uses the configured seed, or a random one.
    pub fn diagnose(
        &self,
        hint: &Hint,
        pith: &Pith,
        exception_label: &str,
    ) -> CheckResult<Option<String>> {
        let seed = self.config.seed.unwrap_or_else(rand::random);
        self.diagnose_seeded(hint, pith, exception_label, seed)
    }

    /// As [`Engine::diagnose`], sampling containers with `seed`.
    ///
    /// Debug builds also run the compiled check and fail with
    /// `InconsistentVerdict` if it accepts a pith the sleuth found a cause for.
    pub fn diagnose_seeded(
        &self,
        hint: &Hint,
        pith: &Pith,
        exception_label: &str,
        seed: u64,
    ) -> CheckResult<Option<String>> {
        let cause = diagnose_with(&self.parts(), hint, pith, exception_label, seed)?;

        if cfg!(debug_assertions) && cause.is_some() {
            let accepted = self
                .compile_with_metrics(hint, exception_label, Arc::new(MetricsRegistry::new()))
                .and_then(|procedure| procedure.check_seeded(pith, seed))
                .map_err(|err| self.runtime.observe_defect(exception_label, err))?;
            if accepted {
                let err = CheckError::inconsistent(
                    exception_label,
                    hint,
                    format!(
                        "compiled check accepted {} but the sleuth found a cause",
                        self.represent.represent(pith)
                    ),
                );
                return Err(self.runtime.observe_defect(exception_label, err));
            }
        }
        Ok(cause)
    }

    /// Compile `hint` into a checker reporting violations under `exception_label`.
    pub fn checker(&self, hint: Hint, exception_label: impl Into<String>) -> CheckResult<Checker> {
        let exception_label = exception_label.into();
        let procedure = self.compile_labeled(&hint, &exception_label)?;
        Ok(Checker {
            hint,
            exception_label,
            procedure,
            parts: self.parts(),
        })
    }

    fn compile_with_metrics(
        &self,
        hint: &Hint,
        label: &str,
        metrics: Arc<MetricsRegistry>,
    ) -> CheckResult<CheckProcedure> {
        if hint.exceeds_depth(self.config.max_depth) {
            return Err(CheckError::too_deep(self.config.max_depth));
        }
        Compiler::new(&self.runtime, self.config.strategy, self.config.max_depth, label).compile(
            hint,
            self.config.seed,
            metrics,
        )
    }

    fn parts(&self) -> Parts {
        Parts {
            config: self.config.clone(),
            runtime: Arc::clone(&self.runtime),
            represent: Arc::clone(&self.represent),
        }
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("metrics", &self.metrics)
            .finish()
    }
}

/// What the sleuth needs from an engine, shareable with checkers.
#[derive(Clone)]
struct Parts {
    config: CheckConfig,
    runtime: Arc<Runtime>,
    represent: Arc<dyn Represent>,
}

fn diagnose_with(
    parts: &Parts,
    hint: &Hint,
    pith: &Pith,
    exception_label: &str,
    seed: u64,
) -> CheckResult<Option<String>> {
    let runtime = parts.runtime.as_ref();
    if hint.exceeds_depth(parts.config.max_depth) {
        let err = CheckError::too_deep(parts.config.max_depth);
        return Err(runtime.observe_defect(exception_label, err));
    }

    let sleuth = CauseSleuth::new(
        hint,
        pith,
        exception_label,
        seed,
        runtime,
        &parts.config,
        parts.represent.as_ref(),
    );
    let cause = sleuth
        .get_cause_or_none()
        .map_err(|err| runtime.observe_defect(exception_label, err))?;

    if cause.is_some() {
        runtime.metrics().increment_causes_diagnosed();
        let logger = runtime.logger();
        if logger.enabled(Event::ViolationDiagnosed) {
            let hint = hint.to_string();
            logger.log(
                Event::ViolationDiagnosed,
                &[("hint", hint.as_str()), ("label", exception_label)],
            );
        }
    }
    Ok(cause)
}

/// A compiled hint bound to the label its violations are reported under.
#[derive(Clone)]
pub struct Checker {
    hint: Hint,
    exception_label: String,
    procedure: CheckProcedure,
    parts: Parts,
}

impl Checker {
    /// Validate a pith, diagnosing the cause on rejection.
    ///
    /// The compiled check and the sleuth share one sampling seed.
    ///
    /// # Errors
    ///
    /// - definition-time defects surfacing at check time, such as
    ///   unresolvable forward references
    /// - `InconsistentVerdict` if the compiled check rejects but the sleuth
    ///   finds no cause
    pub fn validate(&self, pith: &Pith) -> CheckResult<Verdict> {
        let runtime = self.parts.runtime.as_ref();
        let seed = self.procedure.draw_seed();

        let accepted = self
            .procedure
            .check_seeded(pith, seed)
            .map_err(|err| runtime.observe_defect(&self.exception_label, err))?;
        if accepted {
            return Ok(Verdict::Accepted);
        }

        match diagnose_with(&self.parts, &self.hint, pith, &self.exception_label, seed)? {
            Some(cause) => Ok(Verdict::Rejected(Violation {
                label: self.exception_label.clone(),
                hint: self.hint.to_string(),
                cause,
                verbosity: self.parts.config.verbosity,
            })),
            None => {
                let err = CheckError::inconsistent(
                    &self.exception_label,
                    &self.hint,
                    format!(
                        "compiled check rejected {} but the sleuth found no cause",
                        self.parts.represent.represent(pith)
                    ),
                );
                Err(runtime.observe_defect(&self.exception_label, err))
            }
        }
    }

    /// Compiled check only, without diagnosis.
    pub fn is_valid(&self, pith: &Pith) -> CheckResult<bool> {
        self.procedure.check(pith)
    }

    pub fn hint(&self) -> &Hint {
        &self.hint
    }

    pub fn label(&self) -> &str {
        &self.exception_label
    }

    pub fn procedure(&self) -> &CheckProcedure {
        &self.procedure
    }
}

impl fmt::Debug for Checker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checker")
            .field("hint", &self.hint.to_string())
            .field("exception_label", &self.exception_label)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::{CheckErrorCode, Strategy};
    use crate::pith::Class;
    use crate::vale::Is;

    fn engine() -> Engine {
        Engine::new(CheckConfig::default().with_seed(0)).unwrap()
    }

    fn positive() -> crate::vale::SubscriptedIs {
        Is::new("x > 0", |p| matches!(p, Pith::Int(i) if *i > 0))
    }

    #[test]
    fn test_checker_accepts_and_rejects() {
        let engine = engine();
        let hint = Hint::annotated(Hint::class(engine.catalog().int().clone()), [positive()]);
        let checker = engine.checker(hint, "parameter 'amount'").unwrap();

        assert_eq!(checker.validate(&Pith::Int(5)).unwrap(), Verdict::Accepted);

        let verdict = checker.validate(&Pith::Int(-5)).unwrap();
        let violation = verdict.violation().unwrap();
        assert_eq!(violation.label(), "parameter 'amount'");
        assert_eq!(violation.hint(), "Annotated[int, Is[x > 0]]");
        assert_eq!(violation.cause(), "int -5 violates validator Is[x > 0]");
        assert_eq!(
            violation.to_string(),
            "parameter 'amount' violates type hint Annotated[int, Is[x > 0]], \
             as int -5 violates validator Is[x > 0]."
        );
    }

    #[test]
    fn test_minimal_verbosity_omits_cause() {
        let config = CheckConfig::default().with_verbosity(Verbosity::Minimal);
        let engine = Engine::new(config).unwrap();
        let checker = engine
            .checker(Hint::class(engine.catalog().str().clone()), "return")
            .unwrap();
        let verdict = checker.validate(&Pith::Int(1)).unwrap();
        assert_eq!(
            verdict.violation().unwrap().to_string(),
            "return violates type hint str."
        );
    }

    #[test]
    fn test_diagnose_accepting_pith_is_none() {
        let engine = engine();
        let hint = Hint::class(engine.catalog().int().clone());
        assert_eq!(engine.diagnose(&hint, &Pith::Int(1), "x").unwrap(), None);
    }

    #[test]
    fn test_diagnose_reports_cause_and_counts() {
        let engine = engine();
        let hint = Hint::class(engine.catalog().int().clone());
        let cause = engine.diagnose(&hint, &Pith::None, "x").unwrap();
        assert_eq!(cause.as_deref(), Some("NoneType None not instance of int"));
        assert_eq!(engine.metrics().snapshot().causes_diagnosed, 1);
    }

    #[test]
    fn test_long_reprs_truncated_by_default() {
        let engine = engine();
        let hint = Hint::class(engine.catalog().int().clone());
        let long = Pith::str("x".repeat(500));
        let cause = engine.diagnose(&hint, &long, "x").unwrap().unwrap();
        assert!(cause.contains("..."));
        assert!(cause.len() < 200);
    }

    #[test]
    fn test_deep_pith_rejected_with_elided_cause() {
        let mut pith = Pith::Int(1);
        for _ in 0..3_000 {
            pith = Pith::list(vec![pith]);
        }

        for verbosity in [Verbosity::Default, Verbosity::Maximal] {
            let engine = Engine::new(CheckConfig::default().with_verbosity(verbosity)).unwrap();
            let checker = engine
                .checker(Hint::class(engine.catalog().int().clone()), "x")
                .unwrap();
            let verdict = checker.validate(&pith).unwrap();
            assert_eq!(
                verdict.violation().unwrap().cause(),
                "list [[[[[[[...]]]]]]] not instance of int"
            );
        }
    }

    #[test]
    fn test_engines_keep_their_own_log_level() {
        use crate::observability::Severity;

        let quiet = Engine::new(CheckConfig::default().with_log_level(Severity::Fatal)).unwrap();
        let loud = Engine::new(CheckConfig::default().with_log_level(Severity::Info)).unwrap();
        assert_eq!(quiet.logger().threshold(), Severity::Fatal);
        assert_eq!(loud.logger().threshold(), Severity::Info);
        assert!(!quiet.logger().enabled(Event::ViolationDiagnosed));
        assert!(loud.logger().enabled(Event::ViolationDiagnosed));
    }

    #[test]
    fn test_custom_represent() {
        struct Redacted;
        impl Represent for Redacted {
            fn represent(&self, _: &Pith) -> String {
                "<redacted>".to_string()
            }
        }

        let engine = engine().with_represent(Redacted);
        let hint = Hint::class(engine.catalog().int().clone());
        let cause = engine.diagnose(&hint, &Pith::str("secret"), "x").unwrap().unwrap();
        assert_eq!(cause, "str <redacted> not instance of int");
    }

    #[test]
    fn test_forward_ref_defect_is_not_a_rejection() {
        let engine = engine();
        let checker = engine.checker(Hint::forward_ref("app.Missing"), "x").unwrap();
        let err = checker.validate(&Pith::Int(1)).unwrap_err();
        assert_eq!(err.code(), CheckErrorCode::ForwardRefUnresolved);
        assert!(err.is_defect());
        assert_eq!(engine.metrics().snapshot().defects_raised, 1);
    }

    #[test]
    fn test_scope_shared_with_engine() {
        let scope = Scope::new();
        let engine = Engine::with_scope(CheckConfig::default(), scope.clone()).unwrap();
        let checker = engine.checker(Hint::forward_ref("app.Late"), "x").unwrap();

        let late = Class::new("app", "Late", vec![]);
        scope.define(late.clone());
        let pith = Pith::Object(crate::pith::Instance::new(late));
        assert!(checker.validate(&pith).unwrap().is_accepted());
    }

    #[test]
    fn test_too_deep_in_both_entry_points() {
        let engine = Engine::new(CheckConfig::default().with_max_depth(2)).unwrap();
        let catalog = engine.catalog();
        let hint = Hint::list_of(catalog, Hint::list_of(catalog, Hint::any()));

        let err = engine.compile(&hint).unwrap_err();
        assert_eq!(err.code(), CheckErrorCode::HintTooDeep);
        let err = engine.diagnose(&hint, &Pith::list(vec![]), "x").unwrap_err();
        assert_eq!(err.code(), CheckErrorCode::HintTooDeep);
    }

    #[test]
    fn test_checker_counts_checks() {
        let engine = Engine::new(CheckConfig::default().with_strategy(Strategy::On)).unwrap();
        let checker = engine
            .checker(Hint::list_of(engine.catalog(), Hint::any()), "x")
            .unwrap();
        checker.validate(&Pith::list(vec![Pith::None])).unwrap();
        checker.validate(&Pith::None).unwrap();

        let snapshot = engine.metrics().snapshot();
        assert_eq!(snapshot.hints_compiled, 1);
        assert_eq!(snapshot.checks_performed, 2);
        assert_eq!(snapshot.checks_rejected, 1);
        assert_eq!(snapshot.causes_diagnosed, 1);
    }
}
