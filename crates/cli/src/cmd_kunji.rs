use naamkhoj_kunji::build_keys;
use naamkhoj_types::{Form, SearchConfig};

pub fn run(query: &str, form: Option<Form>) {
    let cfg = SearchConfig::default();
    let forms: &[Form] = match form {
        Some(Form::Strict) => &[Form::Strict],
        Some(Form::Exact) => &[Form::Exact],
        Some(Form::Loose) => &[Form::Loose],
        None => &[Form::Strict, Form::Exact, Form::Loose],
    };

    for &f in forms {
        let keys = build_keys(f, query, &cfg);
        let label = match f {
            Form::Strict => "strict",
            Form::Exact => "exact",
            Form::Loose => "loose",
        };
        println!("{label} ({}): {}", keys.len(), keys.join(" "));
    }
}
