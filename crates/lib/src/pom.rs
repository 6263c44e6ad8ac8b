//! Maven manifest generation.
//!
//! The generated POM is what ties the pipeline to its packaging tool: the
//! `maven-shade-plugin` execution bound to the `package` phase is what leaves
//! both the shaded jar and the `original-` prefixed sibling in `target/`,
//! which the artifact splitter consumes afterwards.

use crate::config::BuildOptions;

/// Generate the POM text for the build directory.
///
/// Deterministic given the options; the orchestrator writes the returned
/// string verbatim to `<build_dir>/pom.xml`.
pub fn generate_pom(options: &BuildOptions) -> String {
  let BuildOptions {
    group_id,
    artifact_id,
    theme_version,
    ..
  } = options;

  format!(
    r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0"
         xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
         xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd">
    <modelVersion>4.0.0</modelVersion>
    <groupId>{group_id}</groupId>
    <artifactId>{artifact_id}</artifactId>
    <version>{theme_version}</version>
    <name>{artifact_id}</name>
    <description>Keycloak theme generated by kcforge</description>
    <packaging>jar</packaging>
    <properties>
        <project.build.sourceEncoding>UTF-8</project.build.sourceEncoding>
        <maven.compiler.source>17</maven.compiler.source>
        <maven.compiler.target>17</maven.compiler.target>
    </properties>
    <build>
        <plugins>
            <plugin>
                <groupId>org.apache.maven.plugins</groupId>
                <artifactId>maven-shade-plugin</artifactId>
                <version>3.5.1</version>
                <executions>
                    <execution>
                        <phase>package</phase>
                        <goals>
                            <goal>shade</goal>
                        </goals>
                    </execution>
                </executions>
            </plugin>
        </plugins>
    </build>
</project>
"#
  )
}
