use crate::constants::{
    ENTER_VR_ID, ENTER_VR_LABEL, ENTER_VR_STYLE, EXIT_VR_LABEL, INSPECTOR_ID, INSPECTOR_STYLE,
};
use crate::dom;
use web_sys as web;

#[inline]
fn set_hidden(el: &web::Element, hidden: bool) {
    let cl = el.class_list();
    if hidden {
        _ = cl.add_1("hidden");
    } else {
        _ = cl.remove_1("hidden");
    }
    // inline fallback for pages without a `.hidden` rule
    let style = el.get_attribute("style").unwrap_or_default();
    let base = style.replace("display:none;", "");
    let next = if hidden {
        format!("display:none;{}", base)
    } else {
        base
    };
    _ = el.set_attribute("style", &next);
}

#[inline]
fn is_hidden(el: &web::Element) -> bool {
    el.class_list().contains("hidden")
        || el
            .get_attribute("style")
            .map(|s| s.contains("display:none"))
            .unwrap_or(false)
}

/// Create the inspector element if the page lacks one.
pub fn ensure_inspector(document: &web::Document) -> anyhow::Result<()> {
    dom::ensure_element(document, INSPECTOR_ID, "pre", INSPECTOR_STYLE).map(|_| ())
}

#[inline]
pub fn show_inspector(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(INSPECTOR_ID) {
        set_hidden(&el, false);
    }
}

#[inline]
pub fn hide_inspector(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(INSPECTOR_ID) {
        set_hidden(&el, true);
    }
}

#[inline]
pub fn inspector_visible(document: &web::Document) -> bool {
    document
        .get_element_by_id(INSPECTOR_ID)
        .map(|el| !is_hidden(&el))
        .unwrap_or(false)
}

#[inline]
pub fn toggle_inspector(document: &web::Document) {
    if inspector_visible(document) {
        hide_inspector(document);
    } else {
        show_inspector(document);
    }
}

pub fn update_inspector(document: &web::Document, text: &str) {
    if let Some(el) = document.get_element_by_id(INSPECTOR_ID) {
        el.set_text_content(Some(text));
    }
}

/// Create the (hidden) Enter VR button.
pub fn ensure_enter_vr(document: &web::Document) -> anyhow::Result<()> {
    let el = dom::ensure_element(document, ENTER_VR_ID, "button", ENTER_VR_STYLE)?;
    el.set_text_content(Some(ENTER_VR_LABEL));
    set_hidden(&el, true);
    Ok(())
}

pub fn show_enter_vr(document: &web::Document, immersive: bool) {
    if let Some(el) = document.get_element_by_id(ENTER_VR_ID) {
        el.set_text_content(Some(if immersive {
            EXIT_VR_LABEL
        } else {
            ENTER_VR_LABEL
        }));
        set_hidden(&el, false);
    }
}
