use crate::domain::model::DesignInputs;

/// 工程數量表的生成提示，涵蓋每一層與面積
pub fn boq_prompt(inputs: &DesignInputs) -> String {
    let layer_descriptions = inputs
        .layers
        .iter()
        .map(|l| format!("- {}: {}, {}mm thick", l.name, l.material, l.thickness_mm))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Generate a detailed Bill of Quantities (BoQ) for a landfill liner system with a total \
         footprint area of {} square meters.\n\n\
         The liner system consists of the following layers, from top to bottom:\n{}\n\n\
         Calculate the quantity for each material.\n\
         - For planar materials like geomembranes, geotextiles, and GCLs, the quantity is the \
         area in square meters. Add a 10% contingency for overlaps and wastage.\n\
         - For soil/aggregate layers like clay, sand, and gravel, the quantity is the volume in \
         cubic meters.\n\
         - The output must be a valid JSON array of objects. Do not include any markdown \
         formatting like ```json.",
        inputs.area_m2, layer_descriptions
    )
}

/// 二維技術剖面圖的提示
pub fn cross_section_prompt(inputs: &DesignInputs) -> String {
    let layer_descriptions = inputs
        .layers
        .iter()
        .map(|l| format!("- {} ({}, {}mm)", l.name, l.material, l.thickness_mm))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Create a detailed, clean, and professional 2D technical cross-sectional drawing of a \
         landfill liner system.\n\
         The drawing should clearly label each layer with its name, material, and thickness.\n\
         The style should be a schematic diagram, suitable for an engineering report. Use clear \
         fonts and distinct patterns or colors for each layer.\n\
         Do not include any people or unnecessary background elements. Focus on the technical \
         accuracy of the layers.\n\n\
         The layers, from top to bottom, are:\n{}",
        layer_descriptions
    )
}

/// 概念性三維剖切模型的提示
pub fn model_3d_prompt(inputs: &DesignInputs) -> String {
    let layer_names = inputs
        .layers
        .iter()
        .map(|l| l.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Create a conceptual 3D model rendering of a modern landfill cell.\n\
         The rendering should show a cutaway view that visualizes the multiple layers of the \
         liner system.\n\
         The overall aesthetic should be clean, professional, and slightly stylized, like an \
         architectural visualization.\n\
         The model should illustrate the overall site utilization and containment structure.\n\
         The liner system includes: {}.\n\
         Show the basic geometry of the cell, such as sloped sides.",
        layer_names
    )
}
