use anyhow::{Error, anyhow};
use cucumber::{gherkin::Step, given};
use revalidate::Resource;

use crate::world::RevalidateWorld;

// =============================================================================
// Resource Steps
// =============================================================================

#[given(expr = "a resource with etag {string}")]
fn resource_etag(world: &mut RevalidateWorld, etag: String) -> Result<(), Error> {
    world.set_etag(&etag);
    Ok(())
}

#[given(expr = "a resource last modified at {string}")]
fn resource_last_modified(world: &mut RevalidateWorld, date: String) -> Result<(), Error> {
    world.set_last_modified(&date)
}

#[given(expr = "a resource with etag {string} last modified at {string}")]
fn resource_identity(world: &mut RevalidateWorld, etag: String, date: String) -> Result<(), Error> {
    world.set_etag(&etag);
    world.set_last_modified(&date)
}

#[given("a resource without identity")]
fn resource_anonymous(world: &mut RevalidateWorld) -> Result<(), Error> {
    world.resource = Resource::new();
    Ok(())
}

// =============================================================================
// Clock Steps
// =============================================================================

#[given(expr = "the current time is {string}")]
fn current_time(world: &mut RevalidateWorld, date: String) -> Result<(), Error> {
    world.set_clock(&date)
}

// =============================================================================
// Request Steps
// =============================================================================

#[given(expr = "a {word} request")]
fn request_method(world: &mut RevalidateWorld, method: String) -> Result<(), Error> {
    world.set_method(&method)
}

#[given(expr = "the request header {string} is {string}")]
fn request_header(world: &mut RevalidateWorld, name: String, value: String) -> Result<(), Error> {
    world.add_header(&name, &value)
}

#[given("the request headers:")]
fn request_headers(world: &mut RevalidateWorld, step: &Step) -> Result<(), Error> {
    let table = step
        .table
        .as_ref()
        .ok_or_else(|| anyhow!("request headers step requires a table"))?;

    for row in &table.rows {
        let [name, value] = row.as_slice() else {
            return Err(anyhow!("expected `| name | value |` rows, got {row:?}"));
        };
        world.add_header(name, value)?;
    }
    Ok(())
}

// =============================================================================
// Configuration Steps
// =============================================================================

#[given("the revalidator configuration:")]
fn configuration(world: &mut RevalidateWorld, step: &Step) -> Result<(), Error> {
    let yaml = step
        .docstring
        .as_ref()
        .ok_or_else(|| anyhow!("configuration step requires a docstring"))?;
    world.load_config(yaml)
}
