//! Layout and scalar style options.
//!
//! Run with: cargo run --example styles

use std::error::Error;
use yaml_stringify::{stringify_with_options, yaml, DumpOptions};

fn main() -> Result<(), Box<dyn Error>> {
    let doc = yaml!({
        "name": "matrix",
        "rows": [[1, 2], [3, 4]],
        "mask": 255,
        "missing": null,
        "limits": { "max": (f64::INFINITY), "min": (f64::NEG_INFINITY) }
    });

    println!("Default:\n{}", stringify_with_options(&doc, &DumpOptions::new())?);

    let styled = DumpOptions::new()
        .with_style("!!int", "hex")
        .with_style("!!null", "canonical")
        .with_style("!!float", "camelcase");
    println!("Styled scalars:\n{}", stringify_with_options(&doc, &styled)?);

    let flow = DumpOptions::new().with_flow_level(1).with_sort_keys(true);
    println!("Flow from level 1, sorted:\n{}", stringify_with_options(&doc, &flow)?);

    let condensed = DumpOptions::new().with_flow_level(0).with_condense_flow(true);
    println!("Condensed flow:\n{}", stringify_with_options(&doc, &condensed)?);

    let wide = DumpOptions::new().with_indent(4).with_no_array_indent(true);
    println!("Four spaces, unindented sequences:\n{}", stringify_with_options(&doc, &wide)?);

    Ok(())
}
