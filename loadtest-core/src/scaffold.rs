//! Idempotent build-artifact scaffolding.
//!
//! The build orchestrator materializes a fixed set of files (two Dockerfiles
//! and one logging config) from embedded templates, but only when they do
//! not already exist. A file the user has customized is never overwritten.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

#[derive(Debug, PartialEq, Eq)]
pub enum ScaffoldOutcome {
    Written,
    Skipped,
}

/// Write `contents` to `path` unless the file already exists. Parent
/// directories are created as needed.
pub fn ensure_file(path: &Path, contents: &str) -> Result<ScaffoldOutcome> {
    if path.exists() {
        return Ok(ScaffoldOutcome::Skipped);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(ScaffoldOutcome::Written)
}

/// Dockerfile for the Flask/stress-ng front-end.
pub const FRONTEND_DOCKERFILE: &str = r#"FROM python:3.11-slim

RUN apt-get update \
    && apt-get install -y --no-install-recommends stress-ng curl \
    && rm -rf /var/lib/apt/lists/*

WORKDIR /app

COPY requirements.txt .
RUN pip install --no-cache-dir -r requirements.txt

COPY app.py .

EXPOSE 8080

CMD ["python", "app.py"]
"#;

/// Dockerfile for the vulnerable echo service. Multi-stage: maven build,
/// slim JRE runtime.
pub const ECHO_DOCKERFILE: &str = r#"FROM maven:3.8-openjdk-11 AS build

WORKDIR /build
COPY pom.xml .
RUN mvn dependency:go-offline -q

COPY src ./src
RUN mvn package -q -DskipTests

FROM openjdk:11-jre-slim

WORKDIR /app
COPY --from=build /build/target/vulnerable-echo-service.jar app.jar

EXPOSE 8085

CMD ["java", "-jar", "app.jar", "--server.port=8085"]
"#;

/// Hardened log4j2 config: message lookups disabled in the pattern layout.
/// This is the default the build orchestrator scaffolds.
pub const LOG_CONFIG_HARDENED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Configuration status="WARN">
    <Appenders>
        <Console name="Console" target="SYSTEM_OUT">
            <PatternLayout pattern="%d{yyyy-MM-dd HH:mm:ss} [%t] %-5level %logger{36} - %m{nolookups}%n"/>
        </Console>
    </Appenders>
    <Loggers>
        <Root level="info">
            <AppenderRef ref="Console"/>
        </Root>
    </Loggers>
</Configuration>
"#;

/// Demonstration log4j2 config with message lookups left enabled. Only
/// scaffolded behind the explicit --vulnerable-logging opt-in.
pub const LOG_CONFIG_DEMO: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Configuration status="WARN">
    <Appenders>
        <Console name="Console" target="SYSTEM_OUT">
            <PatternLayout pattern="%d{yyyy-MM-dd HH:mm:ss} [%t] %-5level %logger{36} - %m%n"/>
        </Console>
    </Appenders>
    <Loggers>
        <Root level="info">
            <AppenderRef ref="Console"/>
        </Root>
    </Loggers>
</Configuration>
"#;
