#![cfg(unix)]

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use samplegen::config::Config;
use samplegen::fragments::ansible::{
    ARGS_PLAYBOOK, INVENTORY_PLAYBOOK, SCAFFOLDED_INVENTORY_PLAYBOOK, SCAFFOLDED_MOLECULE_TASK,
    SCAFFOLDED_PLAYBOOK,
};
use samplegen::patch::write_new_file;
use samplegen::pipeline::advanced_molecule::KINDS;
use samplegen::pipeline::{for_sample, SampleKind};
use tempfile::TempDir;

mod common;

/// Copies `$SEEDS/init` on `init`, and `$SEEDS/<resource>-<Kind>` on
/// `create <resource>`. A `<resource>-<Kind>.watches` seed is appended to
/// `watches.yaml`.
const OPERATOR_SDK: &str = r#"echo "operator-sdk $* KUBECONFIG=${KUBECONFIG:-}" >> "$CALLS"
case "$1" in
  init)
    cp -R "$SEEDS/init/." .
    ;;
  create)
    kind=""
    prev=""
    for arg in "$@"; do
      if [ "$prev" = "--kind" ]; then kind="$arg"; fi
      prev="$arg"
    done
    if [ -d "$SEEDS/$2-$kind" ]; then cp -R "$SEEDS/$2-$kind/." .; fi
    if [ -f "$SEEDS/$2-$kind.watches" ]; then cat "$SEEDS/$2-$kind.watches" >> watches.yaml; fi
    ;;
esac"#;

/// `make bundle` drops the `$SEEDS/bundle` tree into the project.
const MAKE: &str = r#"echo "make $* KUBECONFIG=${KUBECONFIG:-}" >> "$CALLS"
if [ "$1" = "bundle" ]; then cp -R "$SEEDS/bundle/." .; fi"#;

const GO: &str = r#"echo "go $*" >> "$CALLS""#;

const HELM_KUBECONFIG: &str = "KUBECONFIG=broken_so_we_generate_static_default_rules";

const MAKEFILE: &str = "\
.PHONY: bundle
bundle: manifests kustomize operator-sdk ## Generate bundle manifests and metadata, then validate generated files.
\t$(OPERATOR_SDK) generate kustomize manifests -q
\tcd config/manager && $(KUSTOMIZE) edit set image controller=$(IMG)
\t$(KUSTOMIZE) build config/manifests | $(OPERATOR_SDK) generate bundle $(BUNDLE_GEN_FLAGS)
\t$(OPERATOR_SDK) bundle validate ./bundle
";

const MANAGER_YAML: &str = "\
apiVersion: apps/v1
kind: Deployment
metadata:
  name: controller-manager
  namespace: system
spec:
  template:
    spec:
      securityContext:
        runAsNonRoot: true
        # TODO(user): For common cases that do not require escalating privileges
        # it is recommended to ensure that all your Pods/Containers are restrictive.
        # More info: https://kubernetes.io/docs/concepts/security/pod-security-standards/#restricted
        # Please uncomment the following code if your project does NOT have to work on old Kubernetes
        # versions < 1.19 or on vendors versions which do NOT support this field by default (i.e. Openshift < 4.11 ).
        # seccompProfile:
        #   type: RuntimeDefault
      containers:
      - command:
        - /manager
        args:
        - --leader-elect
        image: controller:latest
        name: manager
";

const DEFAULT_KUSTOMIZATION: &str = "\
namespace: memcached-operator-system
namePrefix: memcached-operator-

resources:
- ../crd
- ../rbac
- ../manager
#- ../prometheus
";

const MEMCACHED_TYPES: &str = "\
package v1alpha1

import (
\tmetav1 \"k8s.io/apimachinery/pkg/apis/meta/v1\"
)

// MemcachedSpec defines the desired state of Memcached
type MemcachedSpec struct {
\t// INSERT ADDITIONAL SPEC FIELDS - desired state of cluster
\t// Important: Run \"make\" to regenerate code after modifying this file

\t// Foo is an example field of Memcached. Edit memcached_types.go to remove/update
\tFoo string `json:\"foo,omitempty\"`
}

// MemcachedStatus defines the observed state of Memcached
type MemcachedStatus struct {
\t// INSERT ADDITIONAL STATUS FIELD - define observed state of cluster
\t// Important: Run \"make\" to regenerate code after modifying this file
}

// +kubebuilder:object:root=true
// +kubebuilder:subresource:status

// Memcached is the Schema for the memcacheds API
type Memcached struct {
\tmetav1.TypeMeta   `json:\",inline\"`
\tmetav1.ObjectMeta `json:\"metadata,omitempty\"`

\tSpec   MemcachedSpec   `json:\"spec,omitempty\"`
\tStatus MemcachedStatus `json:\"status,omitempty\"`
}
";

const MEMCACHED_CONTROLLER: &str = "\
package controller

import (
\t\"context\"

\t\"k8s.io/apimachinery/pkg/runtime\"
\tctrl \"sigs.k8s.io/controller-runtime\"
\t\"sigs.k8s.io/controller-runtime/pkg/client\"
\t\"sigs.k8s.io/controller-runtime/pkg/log\"

\tcachev1alpha1 \"github.com/example/memcached-operator/api/v1alpha1\"
)

// MemcachedReconciler reconciles a Memcached object
type MemcachedReconciler struct {
\tclient.Client
\tScheme *runtime.Scheme
}

// +kubebuilder:rbac:groups=cache.example.com,resources=memcacheds,verbs=get;list;watch;create;update;patch;delete
// +kubebuilder:rbac:groups=cache.example.com,resources=memcacheds/status,verbs=get;update;patch
// +kubebuilder:rbac:groups=cache.example.com,resources=memcacheds/finalizers,verbs=update

func (r *MemcachedReconciler) Reconcile(ctx context.Context, req ctrl.Request) (ctrl.Result, error) {
\t_ = log.FromContext(ctx)

\t// TODO(user): your logic here

\treturn ctrl.Result{}, nil
}

// SetupWithManager sets up the controller with the Manager.
func (r *MemcachedReconciler) SetupWithManager(mgr ctrl.Manager) error {
\treturn ctrl.NewControllerManagedBy(mgr).
\t\tFor(&cachev1alpha1.Memcached{}).
\t\tComplete(r)
}
";

const ANSIBLE_DOCKERFILE: &str = "\
FROM quay.io/operator-framework/ansible-operator:v1.28.0

COPY requirements.yml ${HOME}/requirements.yml
RUN ansible-galaxy collection install -r ${HOME}/requirements.yml \\
 && chmod -R ug+rwx ${HOME}/.ansible

COPY watches.yaml ${HOME}/watches.yaml
COPY roles/ ${HOME}/roles/
COPY playbooks/ ${HOME}/playbooks/
";

const TESTING_KUSTOMIZATION: &str = "\
namespace: osdk-test

namePrefix: osdk-

patchesStrategicMerge:
- manager_image.yaml
- debug_logs_patch.yaml
- ../default/manager_auth_proxy_patch.yaml

apiVersion: kustomize.config.k8s.io/v1beta1
kind: Kustomization
resources:
- ../crd
- ../rbac
- ../manager
";

const PLACEHOLDER_ASSERT: &str = "
- name: Add assertions here
  assert:
    that: false
    fail_msg: FIXME Add real assertions for your operator
";

/// A fake toolchain on `PATH` plus the files it hands out, rooted in a
/// temporary directory.
struct Toolchain {
    root: TempDir,
}

impl Toolchain {
    fn new() -> Self {
        let root = TempDir::new().unwrap();
        let bin = root.path().join("bin");
        fs::create_dir_all(&bin).unwrap();
        common::fake_binary(&bin, "operator-sdk", OPERATOR_SDK);
        common::fake_binary(&bin, "make", MAKE);
        common::fake_binary(&bin, "go", GO);
        Self { root }
    }

    fn samples_dir(&self) -> PathBuf {
        self.root.path().join("samples")
    }

    fn calls_log(&self) -> PathBuf {
        self.root.path().join("calls.log")
    }

    fn calls(&self) -> Vec<String> {
        common::calls(&self.calls_log())
    }

    /// Writes `content` to `relative` inside the `stage` seed tree.
    fn seed(&self, stage: &str, relative: &str, content: &str) {
        write_new_file(self.root.path().join("seeds").join(stage).join(relative), content)
            .unwrap();
    }

    /// Bundle files `make bundle` produces for `project`.
    fn seed_bundle(&self, project: &str, layout: &str) {
        self.seed(
            "bundle",
            "bundle/metadata/annotations.yaml",
            &format!(
                "annotations:
  operators.operatorframework.io.bundle.mediatype.v1: registry+v1
  operators.operatorframework.io.bundle.package.v1: {project}
  operators.operatorframework.io.metrics.builder: operator-sdk-v1.28.0
  operators.operatorframework.io.metrics.mediatype.v1: metrics+v1
  operators.operatorframework.io.metrics.project_layout: {layout}
"
            ),
        );
        self.seed(
            "bundle",
            "bundle.Dockerfile",
            &format!(
                "FROM scratch
LABEL operators.operatorframework.io.bundle.mediatype.v1=registry+v1
LABEL operators.operatorframework.io.metrics.builder=operator-sdk-v1.28.0
LABEL operators.operatorframework.io.metrics.mediatype.v1=metrics+v1
LABEL operators.operatorframework.io.metrics.project_layout={layout}
COPY bundle/manifests /manifests/
"
            ),
        );
        let csv = format!(
            "apiVersion: operators.coreos.com/v1alpha1
kind: ClusterServiceVersion
metadata:
  annotations:
    alm-examples: '[]'
    capabilities: Basic Install
    createdAt: \"2023-03-01T10:20:30Z\"
    operators.operatorframework.io/builder: operator-sdk-v1.28.0
    operators.operatorframework.io/project_layout: {layout}
  name: {project}.v0.0.1
  namespace: placeholder
"
        );
        self.seed(
            "bundle",
            &format!("bundle/manifests/{project}.clusterserviceversion.yaml"),
            &csv,
        );
        self.seed(
            "bundle",
            &format!("config/manifests/bases/{project}.clusterserviceversion.yaml"),
            &csv.replace("    createdAt: \"2023-03-01T10:20:30Z\"\n", ""),
        );
    }

    fn config(&self) -> Config {
        let path = std::env::var("PATH").unwrap_or_default();
        let mut env = IndexMap::new();
        env.insert(
            "PATH".to_string(),
            format!("{}:{path}", self.root.path().join("bin").display()),
        );
        env.insert(
            "SEEDS".to_string(),
            self.root.path().join("seeds").display().to_string(),
        );
        env.insert("CALLS".to_string(), self.calls_log().display().to_string());
        Config {
            binary: self
                .root
                .path()
                .join("bin/operator-sdk")
                .display()
                .to_string(),
            env,
            helm_chart: self.root.path().join("memcached-0.0.2.tgz"),
            testdata_dir: self.root.path().join("testdata"),
            ..Config::default()
        }
    }
}

fn project_file(layout: &str) -> String {
    format!("domain: example.com\nlayout:\n- {layout}\n")
}

fn read(dir: &Path, relative: &str) -> String {
    fs::read_to_string(dir.join(relative)).unwrap()
}

#[test_log::test]
fn test_helm_sample_end_to_end() {
    let toolchain = Toolchain::new();
    toolchain.seed("init", "PROJECT", &project_file("helm.sdk.operatorframework.io/v1"));
    toolchain.seed("init", "Makefile", MAKEFILE);
    toolchain.seed("init", "config/manager/manager.yaml", MANAGER_YAML);
    toolchain.seed("init", "config/default/kustomization.yaml", DEFAULT_KUSTOMIZATION);
    toolchain.seed(
        "init",
        "config/samples/cache_v1alpha1_memcached.yaml",
        "apiVersion: cache.example.com/v1alpha1
kind: Memcached
metadata:
  name: memcached-sample
spec:
  replicaCount: 1
  securityContext:
    enabled: true
",
    );
    toolchain.seed(
        "init",
        "config/rbac/role.yaml",
        r#"apiVersion: rbac.authorization.k8s.io/v1
kind: ClusterRole
metadata:
  name: manager-role
rules:
- apiGroups: [""]
  resources: ["pods"]
  verbs: ["get", "list", "watch"]
#+kubebuilder:scaffold:rules
"#,
    );
    toolchain.seed_bundle("memcached-operator", "helm.sdk.operatorframework.io/v1");
    let config = toolchain.config();

    let sample = for_sample(SampleKind::Helm, &toolchain.samples_dir(), &config).unwrap();
    sample.run().unwrap();

    let calls = toolchain.calls();
    assert_eq!(
        calls[0],
        format!(
            "operator-sdk init --plugins helm --domain example.com --group cache --version \
             v1alpha1 --kind Memcached --helm-chart {} {HELM_KUBECONFIG}",
            config.helm_chart.display()
        )
    );
    assert_eq!(
        calls[1],
        format!("make bundle IMG=quay.io/example/memcached-operator:v0.0.1 {HELM_KUBECONFIG}")
    );
    assert_eq!(calls.len(), 2);

    let dir = sample.context.dir();
    let manager = read(dir, "config/manager/manager.yaml");
    assert!(manager.contains("        seccompProfile:\n          type: RuntimeDefault\n"));
    assert!(!manager.contains("TODO(user)"));
    assert!(read(dir, "config/samples/cache_v1alpha1_memcached.yaml")
        .ends_with("securityContext:\n    enabled: false\n"));
    assert!(read(dir, "config/default/kustomization.yaml").ends_with("\n- ../prometheus\n"));

    let role = read(dir, "config/rbac/role.yaml");
    assert!(role.contains("## Rules for cache.example.com/v1alpha1, Kind: Memcached"));
    assert!(!role.contains(r#"resources: ["pods"]"#));

    assert!(read(dir, "Makefile").contains("generate kustomize manifests --interactive=false -q"));
    let csv = read(dir, "bundle/manifests/memcached-operator.clusterserviceversion.yaml");
    assert!(csv.contains("    createdAt: \"2022-11-08T17:26:37Z\"\n"));
    assert!(!csv.contains("operators.operatorframework.io/builder"));
    assert!(!csv.contains("project_layout"));
    let annotations = read(dir, "bundle/metadata/annotations.yaml");
    assert!(annotations.contains("bundle.package.v1: memcached-operator"));
    assert!(!annotations.contains("metrics.builder"));
    assert_eq!(
        read(dir, "bundle.Dockerfile"),
        "FROM scratch
LABEL operators.operatorframework.io.bundle.mediatype.v1=registry+v1
COPY bundle/manifests /manifests/
"
    );
}

#[test_log::test]
fn test_go_sample_end_to_end() {
    let toolchain = Toolchain::new();
    toolchain.seed("init", "PROJECT", &project_file("go.kubebuilder.io/v4"));
    toolchain.seed("init", "Makefile", MAKEFILE);
    toolchain.seed("init", "config/manager/manager.yaml", MANAGER_YAML);
    toolchain.seed("init", "bin/controller-gen", "binary\n");
    toolchain.seed("api-Memcached", "api/v1alpha1/memcached_types.go", MEMCACHED_TYPES);
    toolchain.seed(
        "api-Memcached",
        "internal/controller/memcached_controller.go",
        MEMCACHED_CONTROLLER,
    );
    toolchain.seed(
        "api-Memcached",
        "config/samples/cache_v1alpha1_memcached.yaml",
        "apiVersion: cache.example.com/v1alpha1
kind: Memcached
metadata:
  name: memcached-sample
spec:
  # TODO(user): Add fields here
",
    );
    toolchain.seed_bundle("memcached-operator", "go.kubebuilder.io/v4");

    let config = toolchain.config();
    let sample = for_sample(SampleKind::Go, &toolchain.samples_dir(), &config).unwrap();
    sample.run().unwrap();

    let calls: Vec<String> = toolchain
        .calls()
        .iter()
        .map(|call| call.split(" KUBECONFIG=").next().unwrap().to_string())
        .collect();
    assert_eq!(
        calls,
        vec![
            "operator-sdk init --plugins go/v4 --project-version 3 --repo \
             github.com/example/memcached-operator --domain example.com",
            "operator-sdk create api --group cache --version v1alpha1 --kind Memcached \
             --controller true --resource true",
            "go mod tidy",
            "make bundle IMG=quay.io/example/memcached-operator:v0.0.1",
            "make fmt",
        ]
    );

    let dir = sample.context.dir();
    let types = read(dir, "api/v1alpha1/memcached_types.go");
    assert!(types.contains("\tSize int32 `json:\"size,omitempty\"`"));
    assert!(types.contains("\tNodes []string `json:\"nodes,omitempty\"`"));
    assert!(types.contains(
        "// +kubebuilder:subresource:status\n// +operator-sdk:csv:customresourcedefinitions:\
         resources={{Deployment,v1,memcached-deployment}}"
    ));

    let controller = read(dir, "internal/controller/memcached_controller.go");
    assert!(controller.contains("\tctrllog \"sigs.k8s.io/controller-runtime/pkg/log\""));
    assert!(controller.contains("log := ctrllog.FromContext(ctx)"));
    assert!(controller.contains("// +kubebuilder:rbac:groups=apps,resources=deployments"));
    assert!(controller.contains("\t\tOwns(&appsv1.Deployment{}).\n"));
    assert!(!controller.contains("TODO(user): your logic here"));

    assert!(read(dir, "config/samples/cache_v1alpha1_memcached.yaml").ends_with("  size: 1\n"));
    assert!(read(dir, "config/manager/manager.yaml").contains("seccompProfile:\n"));
    assert!(read(dir, "bundle/manifests/memcached-operator.clusterserviceversion.yaml")
        .contains("createdAt: \"2022-11-08T17:26:37Z\""));
    assert!(!dir.join("bin").exists());
}

fn seed_ansible_api(toolchain: &Toolchain, group: &str, version: &str, kind: &str) {
    let lower = kind.to_lowercase();
    let stage = format!("api-{kind}");
    toolchain.seed(
        &stage,
        &format!("roles/{lower}/tasks/main.yml"),
        &format!("---\n# tasks file for {kind}\n"),
    );
    toolchain.seed(
        &stage,
        &format!("molecule/default/tasks/{lower}_test.yml"),
        &format!(
            "---\n- name: Create the {group}.example.com/{version}.{kind}\n  k8s:\n    state: \
             present\n{PLACEHOLDER_ASSERT}"
        ),
    );
    toolchain.seed(
        "",
        &format!("{stage}.watches"),
        &format!(
            "- version: {version}\n  group: {group}.example.com\n  kind: {kind}\n  role: {lower}\n"
        ),
    );
}

#[test_log::test]
fn test_ansible_molecule_sample_end_to_end() {
    let toolchain = Toolchain::new();
    toolchain.seed("init", "PROJECT", &project_file("ansible.sdk.operatorframework.io/v1"));
    toolchain.seed("init", "Makefile", MAKEFILE);
    toolchain.seed("init", "Dockerfile", ANSIBLE_DOCKERFILE);
    toolchain.seed("init", "config/default/kustomization.yaml", DEFAULT_KUSTOMIZATION);
    toolchain.seed("init", "config/testing/kustomization.yaml", TESTING_KUSTOMIZATION);
    toolchain.seed(
        "init",
        "config/rbac/role.yaml",
        "apiVersion: rbac.authorization.k8s.io/v1
kind: ClusterRole
rules:
# +kubebuilder:scaffold:rules
",
    );
    toolchain.seed(
        "init",
        "watches.yaml",
        "---
- version: v1alpha1
  group: cache.example.com
  kind: Memcached
  playbook: playbooks/memcached.yml
",
    );
    toolchain.seed(
        "init",
        "roles/memcached/tasks/main.yml",
        "---\n# tasks file for Memcached\n",
    );
    toolchain.seed(
        "init",
        "roles/memcached/defaults/main.yml",
        "---\n# defaults file for Memcached\n",
    );
    toolchain.seed(
        "init",
        "config/samples/cache_v1alpha1_memcached.yaml",
        "apiVersion: cache.example.com/v1alpha1
kind: Memcached
metadata:
  name: memcached-sample
spec:
  foo: bar
",
    );
    toolchain.seed(
        "init",
        "molecule/default/tasks/memcached_test.yml",
        &format!("---\n{SCAFFOLDED_MOLECULE_TASK}\n"),
    );
    seed_ansible_api(&toolchain, "cache", "v1alpha1", "Foo");
    seed_ansible_api(&toolchain, "cache", "v1alpha1", "Memfin");
    seed_ansible_api(&toolchain, "ignore", "v1", "Secret");
    toolchain.seed_bundle("memcached-molecule-operator", "ansible.sdk.operatorframework.io/v1");

    let config = toolchain.config();
    let sample =
        for_sample(SampleKind::AnsibleMolecule, &toolchain.samples_dir(), &config).unwrap();
    sample.run().unwrap();

    let calls = toolchain.calls();
    assert!(calls[0].starts_with(
        "operator-sdk init --plugins ansible --group cache --version v1alpha1 --kind Memcached \
         --domain example.com --generate-role --generate-playbook"
    ));
    assert!(calls[3].starts_with(
        "operator-sdk create api --group ignore --version v1 --kind Secret --generate-role"
    ));

    let dir = sample.context.dir();
    assert!(read(dir, "config/testing/watch_namespace_patch.yaml")
        .contains("- name: WATCH_NAMESPACE\n"));
    assert!(read(dir, "config/testing/kustomization.yaml").contains(
        "patchesStrategicMerge:\n- watch_namespace_patch.yaml\n- manager_image.yaml\n"
    ));

    let watches = read(dir, "watches.yaml");
    assert!(watches.contains("    role: memfin\n"));
    assert!(watches.contains("  group: \"\"\n  kind: Secret\n  role: secret\n  manageStatus"));
    assert!(!watches.contains("ignore.example.com"));

    assert!(!dir.join("molecule/default/tasks/secret_test.yml").exists());
    for kind in ["foo", "memfin"] {
        let test = read(dir, &format!("molecule/default/tasks/{kind}_test.yml"));
        assert!(!test.contains("FIXME"), "{kind}");
    }
    assert!(!read(dir, "molecule/default/tasks/memcached_test.yml").contains("FIXME"));
    assert!(read(dir, "roles/memfin/tasks/main.yml").contains("name: deleteme"));
    assert!(read(dir, "roles/memcached/defaults/main.yml").ends_with("size: 1\n"));
    assert!(read(dir, "Dockerfile")
        .starts_with("FROM quay.io/operator-framework/ansible-operator:dev\n"));
    assert!(read(dir, "PROJECT").starts_with("multigroup: true\n"));
    assert!(read(dir, "bundle/manifests/memcached-molecule-operator.clusterserviceversion.yaml")
        .contains("createdAt: \"2023-03-01T10:20:30Z\""));
}

#[test_log::test]
fn test_advanced_molecule_sample_end_to_end() {
    let toolchain = Toolchain::new();
    toolchain.seed("init", "PROJECT", &project_file("ansible.sdk.operatorframework.io/v1"));
    toolchain.seed("init", "Makefile", MAKEFILE);
    toolchain.seed("init", "Dockerfile", ANSIBLE_DOCKERFILE);
    toolchain.seed("init", "config/testing/kustomization.yaml", TESTING_KUSTOMIZATION);
    toolchain.seed(
        "init",
        "config/rbac/role.yaml",
        "apiVersion: rbac.authorization.k8s.io/v1
kind: ClusterRole
rules:
#+kubebuilder:scaffold:rules
",
    );
    toolchain.seed(
        "init",
        "config/manager/manager.yaml",
        "        args:
        - --leader-elect
        - --leader-election-id=advanced-molecule-operator
        env:
        - name: ANSIBLE_GATHERING
          value: explicit
",
    );
    toolchain.seed(
        "init",
        "config/default/manager_auth_proxy_patch.yaml",
        r#"      - name: manager
        args:
        - "--health-probe-bind-address=:6789"
        - "--leader-elect"
"#,
    );
    toolchain.seed(
        "init",
        "roles/inventorytest/tasks/main.yml",
        "---\n# tasks file for InventoryTest\n",
    );
    toolchain.seed(
        "init",
        "config/samples/test_v1alpha1_inventorytest.yaml",
        "apiVersion: test.example.com/v1alpha1
kind: InventoryTest
metadata:
  name: inventorytest-sample
spec:
  # TODO(user): Add fields here
",
    );
    toolchain.seed(
        "init",
        "playbooks/inventorytest.yml",
        &format!("{SCAFFOLDED_INVENTORY_PLAYBOOK}\n"),
    );
    for kind in KINDS {
        let lower = kind.to_lowercase();
        let stage = format!("api-{kind}");
        toolchain.seed(&stage, &format!("playbooks/{lower}.yml"), SCAFFOLDED_PLAYBOOK);
        toolchain.seed(
            &stage,
            &format!("molecule/default/tasks/{lower}_test.yml"),
            &format!(
                "---\n- name: Create the test.example.com/v1alpha1.{kind}\n{PLACEHOLDER_ASSERT}"
            ),
        );
    }
    toolchain.seed_bundle("advanced-molecule-operator", "ansible.sdk.operatorframework.io/v1");

    let testdata = toolchain.root.path().join("testdata");
    for (file, content) in [
        ("ansible.cfg", "[defaults]\ninventory = /opt/ansible/inventory\n"),
        ("plugins/filter/test.py", "def test(value):\n    return value\n"),
        ("fixture_collection/galaxy.yml", "namespace: operator_sdk\nname: test_fixtures\n"),
        ("watches.yaml", "---\n- version: v1alpha1\n  group: test.example.com\n  kind: ArgsTest\n"),
        ("tasks/inventorytest_test.yml", "---\n- name: Check inventory\n"),
        ("secret.yml", "---\n- hosts: localhost\n"),
        ("inventory/hosts", "[test]\n127.0.0.1 ansible_connection=local\n"),
        ("playbooks/finalizerconcurrencyfinalizer.yml", "---\n- hosts: localhost\n"),
    ] {
        write_new_file(testdata.join(file), content).unwrap();
    }

    let config = toolchain.config();
    let sample =
        for_sample(SampleKind::AdvancedMolecule, &toolchain.samples_dir(), &config).unwrap();
    sample.run().unwrap();

    let calls = toolchain.calls();
    assert!(calls[0].starts_with(
        "operator-sdk init --plugins ansible --domain example.com --group test --version v1alpha1 \
         --kind InventoryTest --generate-role --generate-playbook"
    ));
    for (call, kind) in calls[1..=KINDS.len()].iter().zip(KINDS) {
        assert!(call.starts_with(&format!(
            "operator-sdk create api --plugins ansible --group test --version v1alpha1 --kind \
             {kind} --generate-playbook"
        )));
    }

    let dir = sample.context.dir();
    assert_eq!(read(dir, "playbooks/argstest.yml"), ARGS_PLAYBOOK);
    assert_eq!(read(dir, "playbooks/collectiontest.yml"), SCAFFOLDED_PLAYBOOK);
    assert!(read(dir, "playbooks/inventorytest.yml").starts_with(INVENTORY_PLAYBOOK));
    for kind in KINDS {
        let test = read(dir, &format!("molecule/default/tasks/{}_test.yml", kind.to_lowercase()));
        assert!(!test.contains("FIXME"), "{kind}");
    }

    let inventory_sample = read(dir, "config/samples/test_v1alpha1_inventorytest.yaml");
    assert!(inventory_sample.contains("\"ansible.sdk.operatorframework.io/verbosity\": \"0\""));
    assert!(inventory_sample.ends_with("  size: 3\n"));
    assert!(read(dir, "roles/inventorytest/tasks/main.yml").contains("name: inventory-cm"));

    assert!(read(dir, "watches.yaml").contains("kind: ArgsTest"));
    assert_eq!(read(dir, "inventory/hosts"), "[test]\n127.0.0.1 ansible_connection=local\n");
    assert!(dir.join("plugins/filter/test.py").is_file());
    assert!(dir.join("molecule/default/tasks/inventorytest_test.yml").is_file());
    assert!(dir.join("playbooks/secret.yml").is_file());

    assert!(read(dir, "Dockerfile")
        .contains("COPY playbooks/ ${HOME}/playbooks/\n\n# Customizations"));
    let manager = read(dir, "config/manager/manager.yaml");
    assert!(manager.contains(
        "- --leader-election-id=advanced-molecule-operator\n        - \
         --ansible-args='--vault-password-file /opt/ansible/pwd.yml'\n"
    ));
    assert!(manager.contains("value: explicit\n        - name: ANSIBLE_DEBUG_LOGS\n"));
    assert!(read(dir, "config/default/manager_auth_proxy_patch.yaml")
        .contains("--vault-password-file /opt/ansible/pwd.yml"));
    assert!(read(dir, "config/rbac/role.yaml").contains("  ## Base operator rules\n"));
    assert!(read(dir, "config/testing/kustomization.yaml")
        .contains("- manager_image.yaml\n- pull_policy/Never.yaml\n"));
    assert!(read(dir, "PROJECT").starts_with("multigroup: true\n"));
}
