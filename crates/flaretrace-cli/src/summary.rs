use console::Style;
use flaretrace_core::config::AnalysisConfig;
use flaretrace_core::pipeline::AnalysisReport;
use flaretrace_core::roi::ComponentSelection;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_run_summary(config: &AnalysisConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("FlareTrace Analysis"));
    println!("  {}", s.title.apply_to("\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}"));
    println!();

    // Input / Output / Flare marker
    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(config.input_dir.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Pattern"),
        s.value.apply_to(&config.pattern)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(config.output.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Flare time"),
        s.value.apply_to(&config.flare_time)
    );
    println!();

    // Detection
    println!("  {}", s.header.apply_to("Detection"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Reference"),
        s.value.apply_to(format!("frame {}", config.reference_frame))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Sigma"),
        s.value.apply_to(format!("{} px", config.roi.blur_sigma))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Threshold"),
        s.value
            .apply_to(format!("{:.0}%", config.roi.threshold_fraction * 100.0))
    );
    match config.roi.selection {
        ComponentSelection::Largest => println!(
            "    {:<12}{}",
            s.label.apply_to("Component"),
            s.method.apply_to("largest")
        ),
        ComponentSelection::Label(n) => println!(
            "    {:<12}{}",
            s.label.apply_to("Component"),
            s.method.apply_to(format!("label {n}"))
        ),
    }
    println!();

    // Series
    println!("  {}", s.header.apply_to("Series"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Pairs"),
        s.value.apply_to(config.pair_count)
    );
    println!();
}

pub fn print_report_summary(report: &AnalysisReport) {
    let s = Styles::new();

    println!();
    println!("  {}", s.header.apply_to("Results"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Frames"),
        s.value.apply_to(report.frames_loaded)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Components"),
        s.value.apply_to(report.component_count)
    );
    if report.roi_area > 0 {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Region"),
            s.value.apply_to(format!(
                "{} px (label {})",
                report.roi_area, report.selected_label
            ))
        );
    } else {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Region"),
            s.disabled.apply_to("empty")
        );
    }
    println!(
        "    {:<12}{}",
        s.label.apply_to("Samples"),
        s.value.apply_to(report.series.len())
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Peak sum"),
        s.value.apply_to(format!("{:.4e}", report.peak_value))
    );

    println!();
    println!("Chart saved to {}", s.path.apply_to(report.output.display()));
}
