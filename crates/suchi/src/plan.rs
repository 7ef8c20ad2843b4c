use naamkhoj_types::{Field, Form, IndexFamily, Scope, SearchConfig};

/// Keys to run against one index family.
#[derive(Debug, Clone)]
pub struct Lookup {
    pub family: IndexFamily,
    pub keys: Vec<String>,
}

/// The full lookup fan for one query: at most six entries, one per queried
/// index family, empty-key families omitted.
#[derive(Debug, Clone, Default)]
pub struct LookupPlan {
    pub lookups: Vec<Lookup>,
}

/// Build the lookup plan for a query.
///
/// Strict and exact families are always queried; the loose family only when
/// fuzzy matching is on. Key lists are capped at
/// `cfg.max_keys_per_lookup` — selectivity, not completeness, is the
/// contract beyond the cap.
pub fn build_plan(query: &str, scope: Scope, exact_only: bool, cfg: &SearchConfig) -> LookupPlan {
    let fields: &[Field] = match scope {
        Scope::Voter => &[Field::Voter],
        Scope::Relative => &[Field::Relative],
        Scope::Anywhere => &[Field::Voter, Field::Relative],
    };
    let forms: &[Form] = if exact_only {
        &[Form::Strict, Form::Exact]
    } else {
        &[Form::Strict, Form::Exact, Form::Loose]
    };

    let mut plan = LookupPlan::default();
    for &form in forms {
        let mut keys = naamkhoj_kunji::build_keys(form, query, cfg);
        if keys.len() > cfg.max_keys_per_lookup {
            tracing::debug!(
                form = ?form,
                dropped = keys.len() - cfg.max_keys_per_lookup,
                "key list over lookup cap, truncating"
            );
            keys.truncate(cfg.max_keys_per_lookup);
        }
        if keys.is_empty() {
            continue;
        }
        for &field in fields {
            plan.lookups.push(Lookup {
                family: IndexFamily::new(form, field),
                keys: keys.clone(),
            });
        }
    }
    plan
}
