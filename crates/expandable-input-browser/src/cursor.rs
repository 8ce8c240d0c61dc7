//! Selection and caret operations on contenteditable elements.
//!
//! Uses the DOM Selection and Range APIs directly.

use expandable_input_core::{PlatformError, TextPiece};

/// Make the whole content of `node` the active selection.
pub fn select_node_contents(node: &web_sys::Node) -> Result<(), PlatformError> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let selection = window
        .get_selection()
        .map_err(|e| format!("get_selection failed: {:?}", e))?
        .ok_or("no selection object")?;
    let range = document
        .create_range()
        .map_err(|e| format!("create_range failed: {:?}", e))?;

    range
        .select_node_contents(node)
        .map_err(|e| format!("select_node_contents failed: {:?}", e))?;

    selection
        .remove_all_ranges()
        .map_err(|e| format!("remove_all_ranges failed: {:?}", e))?;
    selection
        .add_range(&range)
        .map_err(|e| format!("add_range failed: {:?}", e))?;

    Ok(())
}

/// Replace the current selection with nodes built from `pieces`, leaving the
/// caret after the inserted content.
///
/// Text runs become text nodes and line breaks become `<br>` elements, so
/// nothing in the pasted text is ever parsed as markup. Does nothing when
/// there is no selection range.
pub fn replace_selection_with(pieces: &[TextPiece<'_>]) -> Result<(), PlatformError> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let selection = window
        .get_selection()
        .map_err(|e| format!("get_selection failed: {:?}", e))?
        .ok_or("no selection object")?;
    if selection.range_count() == 0 {
        tracing::debug!("no selection range to paste into");
        return Ok(());
    }

    let range = selection
        .get_range_at(0)
        .map_err(|e| format!("get_range_at failed: {:?}", e))?;
    range
        .delete_contents()
        .map_err(|e| format!("delete_contents failed: {:?}", e))?;

    let fragment = document.create_document_fragment();
    for piece in pieces {
        let node: web_sys::Node = match piece {
            TextPiece::Text(text) => document.create_text_node(text).into(),
            TextPiece::LineBreak => document
                .create_element("br")
                .map_err(|e| format!("create_element failed: {:?}", e))?
                .into(),
        };
        fragment
            .append_child(&node)
            .map_err(|e| format!("append_child failed: {:?}", e))?;
    }

    range
        .insert_node(&fragment)
        .map_err(|e| format!("insert_node failed: {:?}", e))?;
    range.collapse_with_to_start(false);

    selection
        .remove_all_ranges()
        .map_err(|e| format!("remove_all_ranges failed: {:?}", e))?;
    selection
        .add_range(&range)
        .map_err(|e| format!("add_range failed: {:?}", e))?;

    Ok(())
}

/// Insert text at the caret with `document.execCommand("insertText")`.
///
/// Goes through the engine's editing pipeline, so the insertion joins the
/// native undo stack and fires `input`.
pub fn exec_insert_text(text: &str) -> Result<bool, PlatformError> {
    use wasm_bindgen::JsCast;

    let document = web_sys::window()
        .ok_or("no window")?
        .document()
        .ok_or("no document")?
        .dyn_into::<web_sys::HtmlDocument>()
        .map_err(|_| "document is not an HtmlDocument")?;

    document
        .exec_command_with_show_ui_and_value("insertText", false, text)
        .map_err(|e| format!("execCommand failed: {:?}", e).into())
}
