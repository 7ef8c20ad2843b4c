use naamkhoj_varna::{count_marks, norm_exact, norm_loose, norm_strict, segment, strip_marks};

pub fn run(text: &str) {
    let strict = norm_strict(text);
    println!("Text:   {text}");
    println!("Strict: {strict}");
    println!("Exact:  {}", norm_exact(text));
    println!("Loose:  {}", norm_loose(text));
    println!("Marks:  {}", count_marks(text));

    println!("Entities:");
    for token in strict.split_whitespace() {
        let stripped = strip_marks(token);
        let ents = segment(&stripped);
        println!("  {token}: {}", ents.join(" | "));
    }
}
