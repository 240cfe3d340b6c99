use anyhow::{Error, anyhow};
use cucumber::then;

use crate::world::{RevalidateWorld, VALIDATE_SPAN};

// =============================================================================
// Status Assertions
// =============================================================================

#[then(expr = "the status should be {int}")]
fn status_should_be(world: &mut RevalidateWorld, expected: u16) -> Result<(), Error> {
    let actual = world.evaluation()?.status;
    if actual.code() != expected {
        return Err(anyhow!(
            "Expected status {}, got {} for {:?}",
            expected,
            actual,
            world
        ));
    }
    Ok(())
}

// =============================================================================
// Response Header Assertions
// =============================================================================

#[then(expr = "the response header {string} should be {string}")]
fn header_should_be(world: &mut RevalidateWorld, name: String, expected: String) -> Result<(), Error> {
    let headers = &world.evaluation()?.headers;
    let actual = headers
        .get(name.as_str())
        .ok_or_else(|| anyhow!("Expected header {name}, got {headers:?}"))?;
    if actual.as_bytes() != expected.as_bytes() {
        return Err(anyhow!(
            "Expected header {name} to be {expected:?}, got {actual:?}"
        ));
    }
    Ok(())
}

#[then(expr = "the response header {string} should be absent")]
fn header_absent(world: &mut RevalidateWorld, name: String) -> Result<(), Error> {
    if let Some(value) = world.evaluation()?.headers.get(name.as_str()) {
        return Err(anyhow!("Expected no {name} header, got {value:?}"));
    }
    Ok(())
}

#[then("the response should carry no cache headers")]
fn no_headers(world: &mut RevalidateWorld) -> Result<(), Error> {
    let headers = &world.evaluation()?.headers;
    if !headers.is_empty() {
        return Err(anyhow!("Expected no headers, got {headers:?}"));
    }
    Ok(())
}

// =============================================================================
// Span Assertions
// =============================================================================

#[then(expr = "the deciding rule should be {string}")]
fn deciding_rule(world: &mut RevalidateWorld, expected: String) -> Result<(), Error> {
    let actual = world
        .span_collector
        .field(VALIDATE_SPAN, "rule")
        .ok_or_else(|| anyhow!("no rule recorded on {VALIDATE_SPAN}"))?;
    if actual != expected {
        return Err(anyhow!(
            "Expected rule {expected:?}, got {actual:?}. Spans: {:?}",
            world.span_collector.spans()
        ));
    }
    Ok(())
}

#[then("validation should be skipped")]
fn validation_skipped(world: &mut RevalidateWorld) -> Result<(), Error> {
    if world.span_collector.has_span(VALIDATE_SPAN) {
        return Err(anyhow!(
            "Expected no {VALIDATE_SPAN} span, got {:?}",
            world.span_collector.spans()
        ));
    }
    Ok(())
}

#[then(expr = "the validation span should record status {int}")]
fn span_status(world: &mut RevalidateWorld, expected: u16) -> Result<(), Error> {
    let actual = world
        .span_collector
        .field(VALIDATE_SPAN, "status")
        .ok_or_else(|| anyhow!("no status recorded on {VALIDATE_SPAN}"))?;
    if actual != expected.to_string() {
        return Err(anyhow!("Expected span status {expected}, got {actual}"));
    }
    Ok(())
}
