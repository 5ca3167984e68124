// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with **bold**, _italic_ and `code`, plus #tag and [[Page|a page]].\n\n- Bullet point\n  - Nested item\n- [ ] Task\n\n> [!note] Callout\n> Body text\n\n| a | b |\n| --- | --- |\n| 1 | 2 |\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_nested_quotes(depth: usize) -> String {
    format!("{} deep", ">".repeat(depth))
}
