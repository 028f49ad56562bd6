//! Static page chrome: navbar, intro, call to action and footer.

pub const BRAND: &str = "Quizify";

const NAV_LINKS: [&str; 3] = ["Home", "About", "Contact"];
const FOOTER_LINKS: [&str; 2] = ["Privacy Policy", "Terms of Service"];

const STEPS: [(&str, &str); 3] = [
    (
        "Upload Your PDF",
        "Choose the PDF file that contains the material you want to turn into questions.",
    ),
    (
        "Set Question Count",
        "Decide how many questions you want. It's quick and flexible.",
    ),
    (
        "Generate MCQs",
        "Click generate and watch your questions appear in seconds!",
    ),
];

pub fn navbar() -> Vec<String> {
    vec![
        format!("{BRAND}    {}", NAV_LINKS.join(" | ")),
        "=".repeat(60),
    ]
}

pub fn intro() -> Vec<String> {
    let mut lines = vec![
        "HOW IT WORKS".to_string(),
        "Simple Steps to Create MCQs".to_string(),
        "Follow these easy steps to generate multiple-choice questions from your PDF documents quickly and efficiently.".to_string(),
        String::new(),
    ];
    for (idx, (title, desc)) in STEPS.iter().enumerate() {
        lines.push(format!("  {}. {title}", idx + 1));
        lines.push(format!("     {desc}"));
    }
    lines.push(String::new());
    lines
}

pub fn call_to_action() -> Vec<String> {
    vec![
        "Ready to create your MCQs?".to_string(),
        "Upload your PDF and let AI generate intelligent multiple-choice questions for you."
            .to_string(),
    ]
}

pub fn footer() -> Vec<String> {
    vec![
        "-".repeat(60),
        FOOTER_LINKS.join(" | "),
        format!("(c) 2024 {BRAND}. All rights reserved."),
    ]
}
