use colored::Colorize;

pub fn run(short: bool) {
    if short {
        print_short();
    } else {
        print_full();
    }
}

fn print_short() {
    println!("{}", "Deck file quick reference".bold());
    println!();
    println!("  {}       deck title (window title)", "title:".cyan());
    println!("  {}       light | dark", "theme:".cyan());
    println!("  {}      hint line shown at the bottom", "footer:".cyan());
    println!("  {}      list of slides", "slides:".cyan());
    println!("    {}   slide heading (required)", "heading:".cyan());
    println!("    {}      body text", "body:".cyan());
    println!("    {}  timeline graphic (4 cards, 3 notes)", "timeline:".cyan());
}

fn print_full() {
    println!("{}", "Scrolldeck deck file format".bold());
    println!();
    println!("A deck is a YAML document. All top-level keys are optional");
    println!("except `slides`, which must contain at least one slide.");
    println!();
    println!("{}", "Example".bold());
    println!();
    let example = r#"title: My deck
theme: dark
footer: Scroll or use the arrow keys
slides:
  - heading: First slide
    body: Plain paragraph text.
  - heading: Milestones
    timeline:
      cards:
        - { year: "2019", text: First prototype }
        - { year: "2021", text: Public release }
        - { year: "2023", text: Snap navigation }
        - { year: "2025", text: Native rewrite }
      notes:
        - two quiet years
        - steady adoption
        - full redesign"#;
    println!("{}", example.dimmed());
    println!();
    println!("{}", "Timeline".bold());
    println!();
    println!("A timeline needs at least 4 cards and 3 notes; with fewer,");
    println!("the notes are not drawn. Note N is centered between the");
    println!("cards N and N+1.");
    println!();
    println!("{}", "Keys during presentation".bold());
    println!();
    println!("  Right/Down/PageDown   next slide");
    println!("  Left/Up/PageUp        previous slide");
    println!("  Home / End            first / last slide");
    println!("  D                     toggle theme");
    println!("  F                     toggle fullscreen");
    println!("  Q / Esc               quit");
}
